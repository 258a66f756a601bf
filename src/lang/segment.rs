use serde::{Deserialize, Serialize};

/// Named logical region of the VM's data space.
///
/// A segment tag names an addressing *strategy*, not a physical address:
/// the code generator decides per `(segment, index)` pair whether an
/// access goes through a base pointer, a fixed cell, or no memory at all
/// (`Constant`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Virtual segment: `push constant n` pushes the literal `n`.
    /// There is nothing to pop into.
    Constant,

    /// Function locals, base pointer in `LCL`.
    Local,

    /// Function arguments, base pointer in `ARG`.
    Argument,

    /// Current object fields, base pointer in `THIS`.
    This,

    /// Current array element view, base pointer in `THAT`.
    That,

    /// Eight scratch cells shared by all functions.
    Temp,

    /// Two-cell segment aliasing the `THIS` and `THAT` base pointers
    /// themselves: index 0 is `THIS`, index 1 is `THAT`.
    Pointer,

    /// Per-file variables; each `(file, index)` pair gets its own cell.
    Static,
}

impl Segment {
    /// The segment's spelling in VM surface syntax.
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Temp => "temp",
            Segment::Pointer => "pointer",
            Segment::Static => "static",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_names() {
        assert_eq!(Segment::Constant.name(), "constant");
        assert_eq!(Segment::Argument.name(), "argument");
        assert_eq!(Segment::Pointer.name(), "pointer");
    }

    #[test]
    fn test_segment_display_matches_name() {
        for seg in [
            Segment::Constant,
            Segment::Local,
            Segment::Argument,
            Segment::This,
            Segment::That,
            Segment::Temp,
            Segment::Pointer,
            Segment::Static,
        ] {
            assert_eq!(seg.to_string(), seg.name());
        }
    }

    #[test]
    fn test_segment_is_copy_and_eq() {
        let a = Segment::Local;
        let b = a;
        assert_eq!(a, b);
        assert_ne!(Segment::This, Segment::That);
    }
}
