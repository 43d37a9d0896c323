use std::io::BufRead;

use super::{Error, TableFormat};
use crate::model::table::{DuplicatePolicy, ElementTable};

mod text;
mod toml;

/// Reads a periodic table from `reader`.
///
/// # Errors
///
/// [`Error::Io`] on read failures, [`Error::Parse`] for rows that do not fit
/// `format` (with the offending line), and [`Error::Table`] for symbol
/// problems that cannot be tied to a line.
pub fn read_table<R: BufRead>(
    reader: R,
    format: TableFormat,
    policy: DuplicatePolicy,
) -> Result<ElementTable, Error> {
    let table = match format {
        TableFormat::Text => text::read(reader, policy)?,
        TableFormat::Toml => toml::read(reader, policy)?,
    };
    tracing::debug!(
        %format,
        elements = table.len(),
        max_symbol_len = table.max_symbol_len(),
        "loaded element table"
    );
    Ok(table)
}
