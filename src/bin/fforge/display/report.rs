use std::io::{self, Write};

use formula_forge::io::FormulaRecord;
use formula_forge::{FormulaError, Imbalance};

use crate::util::text::caret_line;

/// Per-formula failure with a caret under the offending character.
pub fn print_formula_error(record: &FormulaRecord, err: &FormulaError) {
    let mut stderr = io::stderr().lock();
    write_report(&mut stderr, record, &err.to_string(), err.position());
}

pub fn print_imbalance(record: &FormulaRecord, imbalance: &Imbalance) {
    let mut stderr = io::stderr().lock();
    write_report(
        &mut stderr,
        record,
        &imbalance.to_string(),
        Some(imbalance.position()),
    );
}

fn write_report(out: &mut impl Write, record: &FormulaRecord, message: &str, pos: Option<usize>) {
    let _ = writeln!(
        out,
        "  ✗ formula #{} (line {}, column {}): {}",
        record.index, record.line, record.column, message
    );
    if let Some(pos) = pos {
        let _ = writeln!(out, "      {}", record.text);
        let _ = writeln!(out, "      {}", caret_line(&record.text, pos));
    }
}
