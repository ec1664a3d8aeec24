//! Streaming declaration emitter.
//!
//! Produces one continued C declaration:
//!
//! ```text
//! const char <name>[] = \
//!   "<escaped line 1>" \
//!   "<escaped line 2>" \
//! ;
//! ```
//!
//! Each input line keeps its own terminator, so the literals concatenate back
//! to exactly the input.

use crate::error::{Error, Result};
use crate::escape::escape_into;
use std::io::{BufRead, Write};
use tracing::{debug, trace};

/// Indentation in front of every literal line
const INDENT: &str = "  ";

/// Closing line of the declaration
const TERMINATOR: &str = ";\n";

/// Counters collected while emitting a declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    /// Number of input lines, and so of literal lines written
    pub lines: usize,
    /// Number of input bytes consumed
    pub bytes: usize,
}

/// Writes a declaration piece by piece to an underlying writer.
///
/// Call [`begin`](Self::begin) once, [`line`](Self::line) per input line and
/// [`finish`](Self::finish) once. Every call writes complete output lines.
pub struct Emitter<W: Write> {
    writer: W,
    name: String,
    stats: EmitStats,
    buf: String,
}

impl<W: Write> Emitter<W> {
    /// Creates an emitter declaring a variable called `name`
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
            stats: EmitStats::default(),
            buf: String::new(),
        }
    }

    /// Writes the declaration header
    pub fn begin(&mut self) -> Result<()> {
        self.buf.clear();
        push_header(&mut self.buf, &self.name);
        self.writer
            .write_all(self.buf.as_bytes())
            .map_err(Error::write)
    }

    /// Writes one input line as an escaped literal
    pub fn line(&mut self, line: &[u8]) -> Result<()> {
        self.buf.clear();
        push_literal_line(&mut self.buf, line);
        self.writer
            .write_all(self.buf.as_bytes())
            .map_err(Error::write)?;

        self.stats.lines += 1;
        self.stats.bytes += line.len();
        trace!("line {}: {} bytes", self.stats.lines, line.len());
        Ok(())
    }

    /// Writes the statement terminator and flushes the writer
    pub fn finish(&mut self) -> Result<EmitStats> {
        self.writer
            .write_all(TERMINATOR.as_bytes())
            .map_err(Error::write)?;
        self.writer.flush().map_err(Error::write)?;
        Ok(self.stats)
    }

    /// Counters for the lines written so far
    pub fn stats(&self) -> EmitStats {
        self.stats
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Read `reader` to end of stream and write the declaration to `writer`.
///
/// Each line is written before the next one is read.
pub fn emit<R: BufRead, W: Write>(mut reader: R, writer: W, name: &str) -> Result<EmitStats> {
    let mut emitter = Emitter::new(writer, name);
    emitter.begin()?;

    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line).map_err(Error::read)?;
        if read == 0 {
            break;
        }
        emitter.line(&line)?;
    }

    let stats = emitter.finish()?;
    debug!(
        "Declared '{}' from {} lines ({} bytes)",
        name, stats.lines, stats.bytes
    );
    Ok(stats)
}

/// Render the declaration for an in-memory input.
///
/// ```
/// use cstrvar_core::emit_to_string;
///
/// assert_eq!(
///     emit_to_string(b"hi\n", "greeting"),
///     "const char greeting[] = \\\n  \"hi\\n\" \\\n;\n"
/// );
/// ```
pub fn emit_to_string(input: &[u8], name: &str) -> String {
    let mut out = String::with_capacity(input.len() + name.len() + 32);
    push_header(&mut out, name);
    for line in input.split_inclusive(|&b| b == b'\n') {
        push_literal_line(&mut out, line);
    }
    out.push_str(TERMINATOR);
    out
}

fn push_header(out: &mut String, name: &str) {
    out.push_str("const char ");
    out.push_str(name);
    out.push_str("[] = \\\n");
}

fn push_literal_line(out: &mut String, line: &[u8]) {
    out.push_str(INDENT);
    out.push('"');
    escape_into(out, line);
    out.push_str("\" \\\n");
}
