// VM Output: sink for values emitted by PRN

use std::io::{self, Write};

/// Receives PRN values in execution order
pub trait OutputSink {
    fn emit(&mut self, value: u8) -> io::Result<()>;
}

/// Writes each value as a decimal line and flushes immediately
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.writer, "{}", value)?;
        self.writer.flush()
    }
}

/// Collects emitted values
impl OutputSink for Vec<u8> {
    fn emit(&mut self, value: u8) -> io::Result<()> {
        self.push(value);
        Ok(())
    }
}
