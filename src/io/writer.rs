use std::io::Write;

use super::Error;

/// Writes one result line per formula.
pub struct ResultWriter<W: Write> {
    inner: W,
    lines: usize,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, lines: 0 }
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), Error> {
        writeln!(self.inner, "{line}")?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, Error> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
