//! # Cinder
//!
//! Code-generation backend of a two-stage VM translator: takes parsed
//! stack-machine commands (arithmetic/logical ops, push/pop against named
//! segments) and emits Hack assembly for a 16-bit accumulator machine.
//!
//! The front end (lexer/parser) and the file driver are external to this
//! crate; they hand over typed [`lang::Command`] values and an output
//! stream, and [`asm::CodeWriter`] does the rest.

pub mod asm;
pub mod lang;

pub use asm::{CodeWriter, CodegenError, Emitter};
pub use lang::{ArithmeticOp, Command, Program, Segment};
