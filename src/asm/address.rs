//! Segment address resolution.
//!
//! Pure decision table from `(segment, index)` to an addressing strategy
//! on the target machine. The push/pop generator only ever sees the
//! three [`Address`] modes; no per-segment special case leaks past this
//! module.

use super::codegen_error::CodegenError;
use crate::lang::Segment;

/// Fixed cell whose *contents* serve as the temp segment's base.
pub const TEMP_BASE: &str = "R14";

/// First temp index sits this many cells past the base, keeping the
/// segment-pointer cells out of temp's reach. A hard constant of the
/// target memory map, not a derived value.
pub const TEMP_OFFSET: u16 = 5;

/// Addressing strategy for one `(segment, index)` access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// No memory location at all: the literal index is the value.
    /// Push-only.
    Constant(u16),

    /// The named cell itself is the value location, with no indirection
    /// through its contents.
    Fixed(String),

    /// The cell at `*base + offset`: a named base cell holds an address
    /// and the effective address is its contents plus the offset.
    Indexed { base: &'static str, offset: u16 },
}

/// Resolve a segment access to its addressing strategy.
///
/// `file_id` namespaces `static` cells so that two source files
/// translated into one output stream cannot collide; it is `None` until
/// the driver supplies the first filename.
///
/// `pointer 0` and `pointer 1` resolve to the `THIS`/`THAT` base cells
/// as fixed cells: reading them yields the base pointer value itself,
/// and writing them rewrites where `this`/`that` point. Ordinary
/// `this n`/`that n` accesses go through the base+offset indirection
/// instead. The two paths are intentionally distinct.
pub fn resolve(
    segment: Segment,
    index: u16,
    file_id: Option<&str>,
) -> Result<Address, CodegenError> {
    match (segment, index) {
        (Segment::Constant, n) => Ok(Address::Constant(n)),

        (Segment::Local, n) => Ok(Address::Indexed {
            base: "LCL",
            offset: n,
        }),
        (Segment::Argument, n) => Ok(Address::Indexed {
            base: "ARG",
            offset: n,
        }),
        (Segment::This, n) => Ok(Address::Indexed {
            base: "THIS",
            offset: n,
        }),
        (Segment::That, n) => Ok(Address::Indexed {
            base: "THAT",
            offset: n,
        }),

        (Segment::Temp, n) => Ok(Address::Indexed {
            base: TEMP_BASE,
            offset: n + TEMP_OFFSET,
        }),

        (Segment::Pointer, 0) => Ok(Address::Fixed("THIS".to_string())),
        (Segment::Pointer, 1) => Ok(Address::Fixed("THAT".to_string())),
        (Segment::Pointer, n) => Err(CodegenError::pointer_index(n)),

        (Segment::Static, n) => match file_id {
            Some(file) => Ok(Address::Fixed(format!("{}.{}", file, n))),
            None => Err(CodegenError::static_without_file(n)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_is_a_value_not_a_location() {
        assert_eq!(
            resolve(Segment::Constant, 7, None).unwrap(),
            Address::Constant(7)
        );
    }

    #[test]
    fn test_pointer_segments_use_their_bases() {
        for (segment, base) in [
            (Segment::Local, "LCL"),
            (Segment::Argument, "ARG"),
            (Segment::This, "THIS"),
            (Segment::That, "THAT"),
        ] {
            assert_eq!(
                resolve(segment, 4, None).unwrap(),
                Address::Indexed { base, offset: 4 }
            );
        }
    }

    #[test]
    fn test_temp_reserves_five_cells() {
        assert_eq!(
            resolve(Segment::Temp, 0, None).unwrap(),
            Address::Indexed {
                base: TEMP_BASE,
                offset: 5
            }
        );
        assert_eq!(
            resolve(Segment::Temp, 6, None).unwrap(),
            Address::Indexed {
                base: TEMP_BASE,
                offset: 11
            }
        );
    }

    #[test]
    fn test_pointer_zero_and_one_are_fixed_cells() {
        assert_eq!(
            resolve(Segment::Pointer, 0, None).unwrap(),
            Address::Fixed("THIS".to_string())
        );
        assert_eq!(
            resolve(Segment::Pointer, 1, None).unwrap(),
            Address::Fixed("THAT".to_string())
        );
    }

    #[test]
    fn test_pointer_other_indices_rejected() {
        for n in [2, 3, 100] {
            assert!(matches!(
                resolve(Segment::Pointer, n, None),
                Err(CodegenError::PointerIndex { index }) if index == n
            ));
        }
    }

    #[test]
    fn test_pointer_differs_from_this_element_access() {
        // `pointer 0` names the THIS cell itself; `this 0` goes through it.
        let direct = resolve(Segment::Pointer, 0, None).unwrap();
        let indirect = resolve(Segment::This, 0, None).unwrap();
        assert_eq!(direct, Address::Fixed("THIS".to_string()));
        assert_eq!(
            indirect,
            Address::Indexed {
                base: "THIS",
                offset: 0
            }
        );
    }

    #[test]
    fn test_static_is_namespaced_by_file() {
        assert_eq!(
            resolve(Segment::Static, 3, Some("Foo")).unwrap(),
            Address::Fixed("Foo.3".to_string())
        );
        assert_eq!(
            resolve(Segment::Static, 3, Some("Bar")).unwrap(),
            Address::Fixed("Bar.3".to_string())
        );
    }

    #[test]
    fn test_static_needs_a_file() {
        assert!(matches!(
            resolve(Segment::Static, 3, None),
            Err(CodegenError::StaticWithoutFile { index: 3 })
        ));
    }
}
