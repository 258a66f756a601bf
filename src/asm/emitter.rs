use std::io::{self, Write};

/// Reserved name for the terminal halt label.
///
/// Generated branch labels always end in `_TRUE_{n}` or `_DONE_{n}`
/// (see [`super::label`]), so this name can never collide with them.
pub const HALT_LABEL: &str = "END_OF_PROGRAM";

/// Indent prefix for every emitted line.
const INDENT: &str = "    ";

/// Appends formatted instruction text to an output stream.
///
/// Every line — instructions, label declarations, comments — is written
/// with a fixed 4-space indent and a trailing newline. [`Emitter::finish`]
/// appends the halt sequence and consumes the emitter, so the underlying
/// stream is released exactly once, on every path.
pub struct Emitter<W: Write> {
    out: W,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Append one instruction line.
    pub fn emit(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(INDENT.as_bytes())?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")
    }

    /// Append an address-load instruction, `@symbol`.
    pub fn load(&mut self, symbol: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{}@{}", INDENT, symbol)
    }

    /// Append a label declaration, `(NAME)`.
    pub fn label(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "{}({})", INDENT, name)
    }

    /// Append a comment line for traceability.
    pub fn comment(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}// {}", INDENT, text)
    }

    /// Append the terminal halt sequence, flush, and release the stream.
    ///
    /// The generated program must not fall through past its last real
    /// instruction, so the tail parks execution in an infinite self-jump:
    ///
    /// ```text
    ///     @END_OF_PROGRAM
    ///     (END_OF_PROGRAM)
    ///     0;JMP
    /// ```
    pub fn finish(mut self) -> io::Result<()> {
        self.load(HALT_LABEL)?;
        self.label(HALT_LABEL)?;
        self.emit("0;JMP")?;
        self.out.flush()
        // `self.out` is dropped here, releasing the stream even when an
        // earlier write already failed.
    }
}
