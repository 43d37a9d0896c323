use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::OnceLock;

use thiserror::Error;

use crate::io::{TableFormat, read_table};

const BUILTIN_TABLE_TEXT: &str = include_str!("../../resources/periodic_table.txt");

static BUILTIN_TABLE: OnceLock<ElementTable> = OnceLock::new();

/// Longest element symbol accepted when building a table.
pub const MAX_SYMBOL_LEN: usize = 3;

/// Errors raised while building an [`ElementTable`] from rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The same symbol appeared twice under [`DuplicatePolicy::Reject`].
    #[error("duplicate element symbol '{symbol}' (bound to {first}, then to {second})")]
    DuplicateSymbol {
        symbol: String,
        first: u32,
        second: u32,
    },

    /// A symbol is empty, too long, or contains non-letters.
    #[error("invalid element symbol '{0}': expected 1 to 3 ASCII letters")]
    InvalidSymbol(String),
}

/// What to do when a symbol is bound more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The earliest row wins; later rows are shadowed and logged.
    #[default]
    KeepFirst,
    /// Fail with [`TableError::DuplicateSymbol`].
    Reject,
}

/// Immutable mapping from case-sensitive element symbol to atomic number.
///
/// Built once per run and only read afterwards, so a shared reference can be
/// handed to any number of threads evaluating independent formulas.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    numbers: HashMap<String, u32>,
    max_symbol_len: usize,
}

impl ElementTable {
    /// Builds a table from `(symbol, atomic number)` rows.
    ///
    /// Row order only matters for duplicates, which are resolved by `policy`.
    /// The greedy-match bound reported by [`max_symbol_len`](Self::max_symbol_len)
    /// is derived from the symbols actually present.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSymbol`] for malformed symbols and
    /// [`TableError::DuplicateSymbol`] for repeated symbols under
    /// [`DuplicatePolicy::Reject`].
    pub fn build<I, S>(rows: I, policy: DuplicatePolicy) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut numbers = HashMap::new();
        let mut max_symbol_len = 0;

        for (symbol, number) in rows {
            let symbol = symbol.into();
            validate_symbol(&symbol)?;

            match numbers.entry(symbol) {
                Entry::Occupied(existing) => match policy {
                    DuplicatePolicy::KeepFirst => {
                        tracing::warn!(
                            symbol = existing.key().as_str(),
                            kept = *existing.get(),
                            shadowed = number,
                            "duplicate element symbol, keeping the first binding"
                        );
                    }
                    DuplicatePolicy::Reject => {
                        return Err(TableError::DuplicateSymbol {
                            symbol: existing.key().clone(),
                            first: *existing.get(),
                            second: number,
                        });
                    }
                },
                Entry::Vacant(slot) => {
                    max_symbol_len = max_symbol_len.max(slot.key().len());
                    slot.insert(number);
                }
            }
        }

        Ok(Self {
            numbers,
            max_symbol_len,
        })
    }

    /// The embedded 118-element table (H through Og).
    pub fn builtin() -> &'static ElementTable {
        BUILTIN_TABLE.get_or_init(|| {
            read_table(
                BUILTIN_TABLE_TEXT.as_bytes(),
                TableFormat::Text,
                DuplicatePolicy::Reject,
            )
            .expect("Failed to parse embedded periodic table. This is a library bug.")
        })
    }

    #[inline]
    pub fn lookup(&self, symbol: &str) -> Option<u32> {
        self.numbers.get(symbol).copied()
    }

    #[inline]
    pub fn contains(&self, symbol: &str) -> bool {
        self.numbers.contains_key(symbol)
    }

    /// Length in bytes of the longest symbol present, `0` for an empty table.
    #[inline]
    pub fn max_symbol_len(&self) -> usize {
        self.max_symbol_len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Entries ordered by atomic number, ties broken by symbol.
    pub fn entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self
            .numbers
            .iter()
            .map(|(symbol, &number)| (symbol.as_str(), number))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Reverse lookup; the lexicographically smallest symbol wins if several
    /// share `number`.
    pub fn symbol_of(&self, number: u32) -> Option<&str> {
        self.numbers
            .iter()
            .filter(|&(_, &n)| n == number)
            .map(|(symbol, _)| symbol.as_str())
            .min()
    }
}

fn validate_symbol(symbol: &str) -> Result<(), TableError> {
    let valid = (1..=MAX_SYMBOL_LEN).contains(&symbol.len())
        && symbol.bytes().all(|b| b.is_ascii_alphabetic());
    if valid {
        Ok(())
    } else {
        Err(TableError::InvalidSymbol(symbol.to_string()))
    }
}
