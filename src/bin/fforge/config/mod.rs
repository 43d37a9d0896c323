use formula_forge::io::TableFormat;
use formula_forge::{Config, DuplicatePolicy, UnknownElementPolicy};

use crate::cli::{BatchOptions, TableFormatArg, TableOptions};
use crate::io::infer_table_format;

impl From<TableFormatArg> for TableFormat {
    fn from(arg: TableFormatArg) -> Self {
        match arg {
            TableFormatArg::Text => TableFormat::Text,
            TableFormatArg::Toml => TableFormat::Toml,
        }
    }
}

pub fn build_eval_config(batch: &BatchOptions) -> Config {
    Config {
        unknown_elements: if batch.strict {
            UnknownElementPolicy::Reject
        } else {
            UnknownElementPolicy::Zero
        },
    }
}

pub fn duplicate_policy(batch: &BatchOptions) -> DuplicatePolicy {
    if batch.strict {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::KeepFirst
    }
}

/// Explicit `--table-format` wins over the file extension.
pub fn table_format(opts: &TableOptions) -> Option<TableFormat> {
    let path = opts.table.as_deref()?;
    Some(
        opts.table_format
            .map(TableFormat::from)
            .unwrap_or_else(|| infer_table_format(path)),
    )
}
