use std::borrow::Cow;

use anyhow::{Context, Result, bail};

use formula_forge::io::read_table;
use formula_forge::{DuplicatePolicy, ElementTable};

use crate::cli::TableOptions;
use crate::config::table_format;
use crate::io::open_table;

/// The built-in table unless `--table` names a file.
pub fn load_table(
    opts: &TableOptions,
    policy: DuplicatePolicy,
) -> Result<Cow<'static, ElementTable>> {
    let (Some(path), Some(format)) = (opts.table.as_deref(), table_format(opts)) else {
        return Ok(Cow::Borrowed(ElementTable::builtin()));
    };

    let reader = open_table(path)?;
    let table = read_table(reader, format, policy)
        .with_context(|| format!("Failed to load element table: {}", path.display()))?;

    if table.is_empty() {
        bail!("Element table '{}' contains no elements", path.display());
    }

    tracing::info!(
        path = %path.display(),
        %format,
        elements = table.len(),
        "using custom element table"
    );
    Ok(Cow::Owned(table))
}
