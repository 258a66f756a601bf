use super::segment::Segment;
use serde::{Deserialize, Serialize};

/// Arithmetic and logical operation on the operand stack.
///
/// Binary and relational ops consume the top two values; unary ops
/// rewrite the top value in place. Relational results are encoded as
/// all-ones (`-1`) for true and `0` for false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    // ───────────────────────────── Arithmetic ───────────────────────────
    /// Stack effect: `( a b -- a+b )`
    Add,

    /// Subtraction; the earlier-pushed operand is the minuend.
    ///
    /// Stack effect: `( a b -- a-b )`
    Sub,

    /// Stack effect: `( x -- -x )`
    Neg,

    // ───────────────────────────── Comparison ───────────────────────────
    /// Stack effect: `( a b -- a==b )`
    Eq,

    /// Stack effect: `( a b -- a>b )`
    Gt,

    /// Stack effect: `( a b -- a<b )`
    Lt,

    // ──────────────────────────────── Logic ─────────────────────────────
    /// Bitwise AND.
    ///
    /// Stack effect: `( a b -- a&b )`
    And,

    /// Bitwise OR.
    ///
    /// Stack effect: `( a b -- a|b )`
    Or,

    /// Bitwise complement.
    ///
    /// Stack effect: `( x -- !x )`
    Not,
}

impl ArithmeticOp {
    /// The operation's spelling in VM surface syntax.
    pub fn name(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }

    /// True for `Neg` and `Not`, which rewrite the stack top in place.
    pub fn is_unary(&self) -> bool {
        matches!(self, ArithmeticOp::Neg | ArithmeticOp::Not)
    }

    /// True for `Eq`, `Gt` and `Lt`, which branch on a comparison and
    /// therefore need freshly generated labels.
    pub fn is_relational(&self) -> bool {
        matches!(self, ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt)
    }
}

impl std::fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed VM command, as handed over by the front end.
///
/// The set is closed: anything the parser cannot classify into one of
/// these shapes never reaches the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Arithmetic/logical operation; carries no operands.
    Arithmetic(ArithmeticOp),

    /// Push a value from `segment[index]` (or the literal `index` for
    /// `constant`) onto the operand stack.
    ///
    /// Stack effect: `( -- x )`
    Push(Segment, u16),

    /// Pop the top of the operand stack into `segment[index]`.
    ///
    /// Stack effect: `( x -- )`
    Pop(Segment, u16),
}

impl std::fmt::Display for Command {
    /// Format a command using VM surface syntax, e.g. `push constant 7`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Arithmetic(op) => write!(f, "{}", op),
            Command::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Command::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        assert_eq!(ArithmeticOp::Add.name(), "add");
        assert_eq!(ArithmeticOp::Eq.name(), "eq");
        assert_eq!(ArithmeticOp::Not.name(), "not");
    }

    #[test]
    fn test_unary_classification() {
        assert!(ArithmeticOp::Neg.is_unary());
        assert!(ArithmeticOp::Not.is_unary());
        assert!(!ArithmeticOp::Add.is_unary());
        assert!(!ArithmeticOp::Eq.is_unary());
    }

    #[test]
    fn test_relational_classification() {
        assert!(ArithmeticOp::Eq.is_relational());
        assert!(ArithmeticOp::Gt.is_relational());
        assert!(ArithmeticOp::Lt.is_relational());
        assert!(!ArithmeticOp::Sub.is_relational());
        assert!(!ArithmeticOp::Not.is_relational());
    }

    #[test]
    fn test_command_display_surface_syntax() {
        assert_eq!(
            Command::Push(Segment::Constant, 7).to_string(),
            "push constant 7"
        );
        assert_eq!(Command::Pop(Segment::Local, 1).to_string(), "pop local 1");
        assert_eq!(Command::Arithmetic(ArithmeticOp::Add).to_string(), "add");
    }

    #[test]
    fn test_command_equality() {
        assert_eq!(
            Command::Push(Segment::Static, 3),
            Command::Push(Segment::Static, 3)
        );
        assert_ne!(
            Command::Push(Segment::Static, 3),
            Command::Pop(Segment::Static, 3)
        );
    }
}
