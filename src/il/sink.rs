//! Destinations for generated instructions.

use std::io::Write;

use crate::error::SinkError;

use super::{Instr, TacListing};

/// An ordered, append-only destination for instructions. The generator never reads it back.
pub trait InstructionSink {
    fn emit(&mut self, instr: Instr);
}

impl InstructionSink for TacListing {
    fn emit(&mut self, instr: Instr) {
        self.push(instr);
    }
}

/// Streams each instruction as a text line.
///
/// Generation cannot fail, so the first I/O error is held back and every later instruction is
/// dropped. [`WriterSink::finish`] reports it.
pub struct WriterSink<W: Write> {
    writer: W,
    lines: usize,
    error: Option<SinkError>,
}
impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines: 0,
            error: None,
        }
    }

    /// The number of lines written successfully.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes the stream and hands back the writer, or the first error encountered.
    pub fn finish(mut self) -> Result<W, SinkError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.writer.flush().map_err(SinkError::Flush)?;
        Ok(self.writer)
    }
}
impl<W: Write> InstructionSink for WriterSink<W> {
    fn emit(&mut self, instr: Instr) {
        if self.error.is_some() {
            return;
        }
        match writeln!(self.writer, "{}", instr) {
            Ok(()) => self.lines += 1,
            Err(source) => {
                self.error = Some(SinkError::Write {
                    line: self.lines + 1,
                    source,
                })
            }
        }
    }
}
