use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_formula_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use formula_forge::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "The element table has a problem near line {} ({} format)",
                    line, format
                ));
                self.add_table_format_hints(*format);
                self.add("Try --table-format if the extension does not match the content");
            }

            IoError::Table(table_err) => {
                self.collect_table_hints(table_err);
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("Input is not valid UTF-8 text");
                self.add("Formulas and element tables must be plain text files");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: the output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_table_format_hints(&mut self, format: formula_forge::io::TableFormat) {
        use formula_forge::io::TableFormat;

        match format {
            TableFormat::Text => {
                self.add("Text tables need exactly two columns per line: symbol and atomic number");
                self.add("Start comments with '#'; blank lines are ignored");
            }

            TableFormat::Toml => {
                self.add("TOML tables list elements under [elements] as Symbol = number");
                self.add("Atomic numbers must be non-negative integers");
            }
        }
    }

    fn collect_table_hints(&mut self, err: &formula_forge::TableError) {
        use formula_forge::TableError;

        match err {
            TableError::DuplicateSymbol {
                symbol,
                first,
                second,
            } => {
                self.add(format!(
                    "Symbol '{}' is bound to both {} and {}",
                    symbol, first, second
                ));
                self.add("Remove the duplicate row, or drop --strict to keep the first binding");
            }

            TableError::InvalidSymbol(symbol) => {
                self.add(format!("'{}' is not a usable element symbol", symbol));
                self.add(format!(
                    "Symbols are 1 to {} ASCII letters, such as H, Ca or Uue",
                    formula_forge::MAX_SYMBOL_LEN
                ));
            }
        }
    }

    fn collect_formula_hints(&mut self, err: &Error) {
        use formula_forge::{FormulaError, MalformedKind};

        let Some(formula_err) = err.downcast_ref::<FormulaError>() else {
            return;
        };

        self.mark_typed();

        match formula_err {
            FormulaError::UnmatchedSymbol { ch, .. } => {
                self.add(format!(
                    "'{}' does not start any symbol in the element table",
                    ch
                ));
                self.add("Symbols are case-sensitive: 'Co' is cobalt, 'CO' is carbon then oxygen");
                self.add("Load a table that defines the symbol with --table");
            }

            FormulaError::Malformed { kind, .. } => match kind {
                MalformedKind::UnmatchedClose | MalformedKind::UnclosedGroup => {
                    self.add("Every '(' needs a matching ')'");
                    self.add("Run `fforge verify` to list all unbalanced formulas");
                }
                MalformedKind::DanglingMultiplier => {
                    self.add("A multiplier must follow an element symbol or ')'");
                }
                MalformedKind::MultiplierOverflow => {
                    self.add("Multipliers must fit in a 64-bit unsigned integer");
                    self.add("Check the formula for a mistyped digit run");
                }
            },

            FormulaError::UnknownElement { symbol } => {
                self.add(format!("'{}' has no atomic number in the table", symbol));
                self.add("Drop --strict to count unknown elements as zero");
            }

            FormulaError::ProtonOverflow => {
                self.add("The proton sum exceeds the 64-bit range");
                self.add("Check multipliers for typos");
            }

            FormulaError::Allocation { requested, .. } => {
                self.add(format!(
                    "Expanding this formula needs room for {} atoms",
                    requested
                ));
                self.add("Check multipliers for typos");
            }
        }

        self.add("Omit --fail-fast to skip bad formulas and continue the batch");
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = err.to_string().to_lowercase();

        if msg.contains("stdin is a terminal") {
            self.add("Pass formulas with -i <FILE> or pipe them into fforge");
        } else if msg.contains("contains no elements") {
            self.add("The table file has no data rows");
            self.add("Omit --table to use the built-in periodic table");
        }
    }
}
