use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Deserialize;

use crate::io::{Error, TableFormat};
use crate::model::table::{DuplicatePolicy, ElementTable};

#[derive(Debug, Deserialize)]
struct TableDocument {
    elements: BTreeMap<String, u32>,
}

pub fn read<R: BufRead>(mut reader: R, policy: DuplicatePolicy) -> Result<ElementTable, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let document: TableDocument = toml::from_str(&text).map_err(|e| {
        let line = e
            .span()
            .map_or(1, |span| text[..span.start].matches('\n').count() + 1);
        Error::parse(TableFormat::Toml, line, e.message())
    })?;

    Ok(ElementTable::build(document.elements, policy)?)
}
