//! Shared operand-stack access sequences.
//!
//! Both generator paths funnel through these routines, so the
//! stack-pointer discipline lives in exactly one place: `SP` always
//! holds the address of the first free slot when a command's sequence
//! begins and ends.

use std::io::{self, Write};

use super::emitter::Emitter;

/// Symbolic address of the stack-pointer cell.
pub const SP: &str = "SP";

/// Append the value in `D` to the stack top and advance `SP`.
///
/// Stack effect: `( -- D )`
pub fn push_d<W: Write>(out: &mut Emitter<W>) -> io::Result<()> {
    out.load(SP)?;
    out.emit("A=M")?;
    out.emit("M=D")?;
    out.load(SP)?;
    out.emit("M=M+1")
}

/// Retreat `SP` and read the exposed top value into `D`.
///
/// Stack effect: `( x -- )`, with `x` left in `D`.
pub fn pop_into_d<W: Write>(out: &mut Emitter<W>) -> io::Result<()> {
    out.load(SP)?;
    out.emit("AM=M-1")?;
    out.emit("D=M")
}

/// Point `A` at the current top-of-stack cell without moving `SP`.
pub fn address_top<W: Write>(out: &mut Emitter<W>) -> io::Result<()> {
    out.load(SP)?;
    out.emit("A=M-1")
}

/// Read the top value into `D` and point `A` at the cell below it,
/// without moving `SP`. This is the operand setup shared by every
/// binary and relational op.
pub fn load_top_pair<W: Write>(out: &mut Emitter<W>) -> io::Result<()> {
    address_top(out)?;
    out.emit("D=M")?;
    out.emit("A=A-1")
}

/// Retreat `SP` by one slot.
pub fn shrink<W: Write>(out: &mut Emitter<W>) -> io::Result<()> {
    out.load(SP)?;
    out.emit("M=M-1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(f: impl FnOnce(&mut Emitter<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        let mut emitter = Emitter::new(&mut buf);
        f(&mut emitter).unwrap();
        drop(emitter);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_push_d_sequence() {
        let text = capture(|e| push_d(e));
        assert_eq!(text, "    @SP\n    A=M\n    M=D\n    @SP\n    M=M+1\n");
    }

    #[test]
    fn test_pop_into_d_sequence() {
        let text = capture(|e| pop_into_d(e));
        assert_eq!(text, "    @SP\n    AM=M-1\n    D=M\n");
    }

    #[test]
    fn test_address_top_sequence() {
        let text = capture(|e| address_top(e));
        assert_eq!(text, "    @SP\n    A=M-1\n");
    }

    #[test]
    fn test_load_top_pair_sequence() {
        let text = capture(|e| load_top_pair(e));
        assert_eq!(text, "    @SP\n    A=M-1\n    D=M\n    A=A-1\n");
    }

    #[test]
    fn test_shrink_sequence() {
        let text = capture(|e| shrink(e));
        assert_eq!(text, "    @SP\n    M=M-1\n");
    }
}
