use std::path::Path;

use formula_forge::io::TableFormat;

/// `.toml` selects TOML; every other extension (or none) is plain text.
pub fn table_format(path: &Path) -> TableFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("toml") => TableFormat::Toml,
        _ => TableFormat::Text,
    }
}
