use super::command::{ArithmeticOp, Command};

/// Stack-height violation found while scanning a command stream.
#[derive(Debug)]
pub struct StackCheckError {
    pub message: String,
}

impl std::fmt::Display for StackCheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stack-check error: {}", self.message)
    }
}

impl std::error::Error for StackCheckError {}

impl StackCheckError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returns (pops, pushes) for a command.
///
/// Every command in the set has a static effect; there is no
/// dynamically-sized case.
fn effect(command: &Command) -> (i32, i32) {
    use ArithmeticOp::*;
    match command {
        Command::Push(_, _) => (0, 1),
        Command::Pop(_, _) => (1, 0),
        Command::Arithmetic(op) => match op {
            Add | Sub | And | Or => (2, 1),
            Eq | Gt | Lt => (2, 1),
            Neg | Not => (1, 1),
        },
    }
}

/// Check stack heights with a given initial height.
///
/// This is the operand-stack precondition the code generator itself does
/// not enforce: it assumes every pop has something to pop. Front ends
/// should run this (or their own equivalent) before handing a stream to
/// the backend.
pub fn check_commands_with_initial(
    commands: &[Command],
    initial_height: i32,
) -> Result<(), StackCheckError> {
    let mut h: i32 = initial_height;

    for (i, command) in commands.iter().enumerate() {
        let (pops, pushes) = effect(command);
        h -= pops;
        if h < 0 {
            return Err(StackCheckError::new(format!(
                "stack underflow at command {}, `{}`, needed {} operand(s)",
                i, command, pops
            )));
        }
        h += pushes;
    }

    Ok(())
}

/// Check stack heights starting from an empty stack.
pub fn check_commands(commands: &[Command]) -> Result<(), StackCheckError> {
    check_commands_with_initial(commands, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Segment;

    #[test]
    fn test_simple_commands() {
        let commands = vec![
            Command::Push(Segment::Constant, 1),
            Command::Push(Segment::Constant, 2),
            Command::Arithmetic(ArithmeticOp::Add),
        ];
        assert!(check_commands(&commands).is_ok());
    }

    #[test]
    fn test_binary_underflow() {
        let commands = vec![
            Command::Push(Segment::Constant, 1),
            Command::Arithmetic(ArithmeticOp::Sub),
        ];
        let result = check_commands(&commands);
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("underflow"));
    }

    #[test]
    fn test_pop_underflow() {
        let commands = vec![Command::Pop(Segment::Local, 0)];
        assert!(check_commands(&commands).is_err());
    }

    #[test]
    fn test_unary_needs_one() {
        assert!(check_commands(&[Command::Arithmetic(ArithmeticOp::Neg)]).is_err());

        let commands = vec![
            Command::Push(Segment::Constant, 9),
            Command::Arithmetic(ArithmeticOp::Not),
        ];
        assert!(check_commands(&commands).is_ok());
    }

    #[test]
    fn test_initial_height_covers_pops() {
        let commands = vec![
            Command::Arithmetic(ArithmeticOp::Eq),
            Command::Pop(Segment::Argument, 0),
        ];
        assert!(check_commands(&commands).is_err());
        assert!(check_commands_with_initial(&commands, 2).is_ok());
    }

    #[test]
    fn test_error_names_offending_command() {
        let commands = vec![
            Command::Push(Segment::Constant, 4),
            Command::Arithmetic(ArithmeticOp::Gt),
        ];
        let message = check_commands(&commands).unwrap_err().message;
        assert!(message.contains("command 1"));
        assert!(message.contains("gt"));
    }

    #[test]
    fn test_relational_net_effect_is_minus_one() {
        // ( a b -- a<b ) leaves one value; popping it empties the stack.
        let commands = vec![
            Command::Push(Segment::Constant, 1),
            Command::Push(Segment::Constant, 2),
            Command::Arithmetic(ArithmeticOp::Lt),
            Command::Pop(Segment::Temp, 0),
            Command::Pop(Segment::Temp, 1),
        ];
        assert!(check_commands(&commands).is_err());
    }
}
