use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::commands::{Outcome, Skipped};
use crate::display::Context;
use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

/// Rows shown before a table collapses the rest into one line.
const MAX_ROWS: usize = 15;

pub fn print_run_summary(rows: &[(&str, String)]) {
    let mut out = io::stderr().lock();
    print_kv_table(&mut out, "Run Summary", rows);
}

pub fn print_element_distribution(counts: &BTreeMap<String, usize>) {
    let total: usize = counts.values().sum();
    let mut sorted: Vec<_> = counts.iter().map(|(s, c)| (s.as_str(), *c)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let mut out = io::stderr().lock();
    print_distribution_table(&mut out, "Element Distribution", &sorted, total);
}

/// Tells the user that the batch finished with some formulas left out.
pub fn print_partial(outcome: &Outcome, ctx: Context) {
    if ctx.quiet {
        return;
    }

    let mut out = io::stderr().lock();
    if ctx.interactive {
        print_skipped_table(&mut out, &outcome.skipped);
    }
    let _ = writeln!(
        out,
        "  {} of {} formulas skipped; their results are missing from the output",
        outcome.skipped.len(),
        outcome.total()
    );
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(&str, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(
        out,
        "{}┌{}┬{}┬{}┐",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT, "Element", "Atoms", "Share"
    );
    let _ = writeln!(
        out,
        "{}├{}┼{}┼{}┤",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(MAX_ROWS) {
        let pct = share(*count, total);
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell
        );
    }

    if data.len() > MAX_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more elements)", data.len() - MAX_ROWS)
        );
    }

    let _ = writeln!(
        out,
        "{}└{}┴{}┴{}┘",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(count_w + 2),
        "─".repeat(dist_w + 2)
    );
}

fn print_skipped_table(out: &mut impl Write, skipped: &[Skipped]) {
    let index_w = 6usize;
    let loc_w = 9usize;
    let sep_overhead = 6;
    let reason_w = SAFE_TABLE_WIDTH.saturating_sub(index_w + loc_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ Skipped Formulas ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{}┬{}┬{}┐",
        INDENT,
        "─".repeat(index_w + 2),
        "─".repeat(loc_w + 2),
        "─".repeat(reason_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:>index_w$} │ {:<loc_w$} │ {:<reason_w$} │",
        INDENT, "#", "Line:Col", "Reason"
    );
    let _ = writeln!(
        out,
        "{}├{}┼{}┼{}┤",
        INDENT,
        "─".repeat(index_w + 2),
        "─".repeat(loc_w + 2),
        "─".repeat(reason_w + 2)
    );

    for entry in skipped.iter().take(MAX_ROWS) {
        let loc = format!("{}:{}", entry.record.line, entry.record.column);
        let _ = writeln!(
            out,
            "{}│ {:>index_w$} │ {:<loc_w$} │ {:<reason_w$} │",
            INDENT,
            entry.record.index,
            truncate(&loc, loc_w),
            truncate(&entry.reason, reason_w)
        );
    }

    if skipped.len() > MAX_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:>index_w$} │ {:<loc_w$} │ {:<reason_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more)", skipped.len() - MAX_ROWS)
        );
    }

    let _ = writeln!(
        out,
        "{}└{}┴{}┴{}┘",
        INDENT,
        "─".repeat(index_w + 2),
        "─".repeat(loc_w + 2),
        "─".repeat(reason_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(
        out,
        "{}┌{}┬{}┐",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(
        out,
        "{}└{}┴{}┘",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(make_bar(50.0, 10), "█████░░░░░");
        assert_eq!(make_bar(0.0, 4), "░░░░");
        assert_eq!(make_bar(100.0, 4), "████");
    }

    #[test]
    fn share_of_empty_total_is_zero() {
        assert_eq!(share(0, 0), 0.0);
        assert_eq!(share(1, 4), 25.0);
    }

    #[test]
    fn distribution_collapses_long_tails() {
        let names: Vec<String> = (0..20).map(|i| format!("E{i}")).collect();
        let data: Vec<_> = names.iter().map(|n| (n.as_str(), 1)).collect();
        let mut out = Vec::new();
        print_distribution_table(&mut out, "Element Distribution", &data, 20);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(5 more elements)"));
        assert!(text.contains("E14"));
        assert!(!text.contains("E15 "));
    }
}
