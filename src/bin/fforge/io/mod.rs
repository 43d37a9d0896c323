mod infer;

pub use infer::table_format as infer_table_format;

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Read, Stdin, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

pub enum InputSource {
    File(BufReader<File>),
    Stdin(BufReader<Stdin>),
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputSource::File(r) => r.read(buf),
            InputSource::Stdin(r) => r.read(buf),
        }
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            InputSource::File(r) => r.fill_buf(),
            InputSource::Stdin(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputSource::File(r) => r.consume(amt),
            InputSource::Stdin(r) => r.consume(amt),
        }
    }
}

pub fn open_input(path: Option<&Path>) -> Result<InputSource> {
    match path {
        Some(p) => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open input file: {}", p.display()))?;
            Ok(InputSource::File(BufReader::new(file)))
        }
        None => Ok(InputSource::Stdin(BufReader::new(io::stdin()))),
    }
}

pub fn open_table(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open element table: {}", path.display()))?;
    Ok(BufReader::new(file))
}

pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::File(w) => w.write(buf),
            OutputTarget::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::File(w) => w.flush(),
            OutputTarget::Stdout(w) => w.flush(),
        }
    }
}

/// Opens the result destination; `append` keeps existing file content.
pub fn create_output(path: Option<&Path>, append: bool) -> Result<OutputTarget> {
    match path {
        Some(p) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .append(append)
                .truncate(!append)
                .open(p)
                .with_context(|| format!("Failed to open output file: {}", p.display()))?;
            Ok(OutputTarget::File(BufWriter::new(file)))
        }
        None => Ok(OutputTarget::Stdout(BufWriter::new(io::stdout().lock()))),
    }
}

/// Short human name for an optional path, `default` when absent.
pub fn display_name(path: Option<&Path>, default: &str) -> String {
    path.and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| default.to_string())
}
