//! # Intermediate command model
//!
//! This module defines the stack-machine intermediate representation
//! consumed by the code generator. Commands arrive here already parsed
//! and classified; the front end that produces them lives outside this
//! crate.
//!
//! ## Documentation conventions
//!
//! - Stack effects are written as `( before -- after )`.
//! - `true` on the operand stack is all-ones (`-1`), `false` is `0`.

pub mod command;
pub mod program;
pub mod segment;
pub mod stack_check;

pub use command::{ArithmeticOp, Command};
pub use program::Program;
pub use segment::Segment;
