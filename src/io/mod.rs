//! Line-oriented text I/O around the formula pipeline.
//!
//! - [`read_table`] ingests a periodic table in [`TableFormat::Text`]
//!   (`symbol number` per line) or [`TableFormat::Toml`] (`[elements]`).
//! - [`FormulaReader`] yields every whitespace-delimited formula of an input
//!   stream together with its location.
//! - [`ResultWriter`] emits one result line per formula.

use std::fmt;

pub mod error;

mod formulas;
mod table;
mod writer;

pub use error::Error;
pub use formulas::{FormulaReader, FormulaRecord};
pub use table::read_table;
pub use writer::ResultWriter;

/// On-disk layout of a periodic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Two whitespace-separated columns, `#` comments allowed.
    #[default]
    Text,
    /// A TOML document with an `[elements]` table of `Symbol = number`.
    Toml,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Text => write!(f, "text"),
            TableFormat::Toml => write!(f, "TOML"),
        }
    }
}
