use std::io::{self, Write};

use super::address::{self, Address};
use super::codegen_error::CodegenError;
use super::emitter::Emitter;
use super::label::LabelGenerator;
use super::stack;
use crate::lang::{ArithmeticOp, Command, Segment};

/// Scratch cell that parks a pop destination address while the stack
/// pointer moves.
const SCRATCH: &str = "R13";

/// Translates parsed VM commands into Hack assembly on an output stream.
///
/// One `CodeWriter` is one translation run: the label counters it carries
/// only ever grow, so every branch label stays unique even when several
/// input files share the stream. Between files the driver calls
/// [`CodeWriter::set_filename`]; everything else is per-command.
///
/// Every `write_*` call either appends a complete, self-contained
/// instruction sequence (the stack pointer is consistent again by the
/// last line) or fails without appending a partial one — address
/// resolution happens before the first line of a command is emitted.
pub struct CodeWriter<W: Write> {
    out: Emitter<W>,
    file_id: Option<String>,
    labels: LabelGenerator,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Emitter::new(out),
            file_id: None,
            labels: LabelGenerator::new(),
        }
    }

    /// Start translating a new source file.
    ///
    /// Must precede the first `static` command of each file; the name
    /// namespaces that file's static cells in the shared output.
    pub fn set_filename(&mut self, name: &str) {
        self.file_id = Some(name.to_string());
    }

    /// Translate one command, dispatching on its shape.
    pub fn write_command(&mut self, command: &Command) -> Result<(), CodegenError> {
        match command {
            Command::Arithmetic(op) => self.write_arithmetic(*op),
            Command::Push(segment, index) => self.write_push(*segment, *index),
            Command::Pop(segment, index) => self.write_pop(*segment, *index),
        }
    }

    /// Translate one arithmetic/logical command.
    pub fn write_arithmetic(&mut self, op: ArithmeticOp) -> Result<(), CodegenError> {
        use ArithmeticOp::*;
        match op {
            Add => self.binary("M=M+D")?,
            Sub => self.binary("M=M-D")?,
            And => self.binary("M=D&M")?,
            Or => self.binary("M=D|M")?,
            Neg => self.unary("M=-M")?,
            Not => self.unary("M=!M")?,
            Eq => self.relational("EQ", "JEQ")?,
            Gt => self.relational("GT", "JGT")?,
            Lt => self.relational("LT", "JLT")?,
        }
        Ok(())
    }

    /// Translate `push segment index`.
    ///
    /// Stack effect: `( -- x )`
    pub fn write_push(&mut self, segment: Segment, index: u16) -> Result<(), CodegenError> {
        // Compute the value into D, then append it to the stack.
        match address::resolve(segment, index, self.file_id.as_deref())? {
            Address::Constant(n) => {
                self.out.load(n)?;
                self.out.emit("D=A")?;
            }
            Address::Fixed(cell) => {
                self.out.load(&cell)?;
                self.out.emit("D=M")?;
            }
            Address::Indexed { base, offset } => {
                self.out.load(base)?;
                self.out.emit("D=M")?;
                self.out.load(offset)?;
                self.out.emit("A=D+A")?;
                self.out.emit("D=M")?;
            }
        }
        stack::push_d(&mut self.out)?;
        Ok(())
    }

    /// Translate `pop segment index`.
    ///
    /// Stack effect: `( x -- )`
    ///
    /// The destination address is resolved and parked in the scratch
    /// cell *before* the stack pointer moves: resolving a base+offset
    /// destination reads a base pointer, which must not get tangled up
    /// with the stack top.
    pub fn write_pop(&mut self, segment: Segment, index: u16) -> Result<(), CodegenError> {
        match address::resolve(segment, index, self.file_id.as_deref())? {
            Address::Constant(_) => return Err(CodegenError::constant_pop(index)),
            Address::Fixed(cell) => {
                self.out.load(&cell)?;
                self.out.emit("D=A")?;
            }
            Address::Indexed { base, offset } => {
                self.out.load(base)?;
                self.out.emit("D=M")?;
                self.out.load(offset)?;
                self.out.emit("D=D+A")?;
            }
        }
        self.out.load(SCRATCH)?;
        self.out.emit("M=D")?;
        stack::pop_into_d(&mut self.out)?;
        self.out.load(SCRATCH)?;
        self.out.emit("A=M")?;
        self.out.emit("M=D")?;
        Ok(())
    }

    /// Append a `// ...` comment line to the output.
    pub fn write_comment(&mut self, text: &str) -> Result<(), CodegenError> {
        self.out.comment(text)?;
        Ok(())
    }

    /// Append the terminal halt sequence and release the output stream.
    ///
    /// Consumes the writer; the stream is released exactly once, even
    /// when writing the halt tail itself fails.
    pub fn close(self) -> Result<(), CodegenError> {
        self.out.finish()?;
        Ok(())
    }

    /// Pop two operands, combine into the lower cell, shrink the stack.
    ///
    /// Stack effect: `( a b -- a?b )`
    fn binary(&mut self, store: &str) -> io::Result<()> {
        stack::load_top_pair(&mut self.out)?;
        self.out.emit(store)?;
        stack::shrink(&mut self.out)
    }

    /// Rewrite the top cell in place.
    ///
    /// Stack effect: `( x -- ?x )`
    fn unary(&mut self, store: &str) -> io::Result<()> {
        stack::address_top(&mut self.out)?;
        self.out.emit(store)
    }

    /// Compare the top two operands and push all-ones or all-zeros.
    ///
    /// Stack effect: `( a b -- a?b )`
    ///
    /// `D = a - b` drives the conditional jump, so `JGT` answers
    /// `a > b`, the earlier-pushed operand on the left.
    fn relational(&mut self, prefix: &str, jump: &str) -> io::Result<()> {
        let (true_label, done_label) = self.labels.branch_pair(prefix);

        stack::load_top_pair(&mut self.out)?;
        self.out.emit("D=M-D")?;
        self.out.load(&true_label)?;
        self.out.emit(&format!("D;{}", jump))?;
        self.out.emit("D=0")?;
        self.out.load(&done_label)?;
        self.out.emit("0;JMP")?;
        self.out.label(&true_label)?;
        self.out.emit("D=-1")?;
        self.out.label(&done_label)?;
        stack::address_top(&mut self.out)?;
        self.out.emit("A=A-1")?;
        self.out.emit("M=D")?;
        stack::shrink(&mut self.out)
    }
}
