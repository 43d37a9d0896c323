use super::TableFormat;
use crate::model::table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} element table: {details} (at line ~{line})")]
    Parse {
        format: TableFormat,
        line: usize,
        details: String,
    },

    #[error("invalid element table: {0}")]
    Table(#[from] TableError),
}

impl Error {
    pub fn parse(format: TableFormat, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }
}
