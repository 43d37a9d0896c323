//! A small, pure Rust library for reading condensed chemical formulas.
//! It resolves element symbols against a periodic table, multiplies out
//! element and parenthesized group multipliers, and sums atomic numbers.
//!
//! # Features
//!
//! - **Greedy tokenizing** : symbols are matched longest-first against the
//!   loaded table, so `Co` wins over `C` followed by `o`
//! - **Group expansion** : arbitrarily nested groups with decimal multipliers,
//!   resolved with an explicit stack instead of recursion
//! - **Proton sums** : 64-bit checked totals over the expanded atom list
//! - **Balance checks** : a table-free parenthesis verdict for any string
//! - **Line-oriented I/O** : periodic tables in plain text or TOML, formula
//!   streams with source locations, one result line per formula
//!
//! # Quick Start
//!
//! ```
//! use formula_forge::{Config, ElementTable, Mode, process};
//!
//! let table = ElementTable::builtin();
//! let config = Config::default();
//!
//! assert_eq!(process("Mg(OH)2", table, Mode::Expand, &config)?, "Mg O H O H");
//! assert_eq!(process("H2O", table, Mode::Protons, &config)?, "10");
//! assert_eq!(process("(H2O", table, Mode::Verify, &config)?, "false");
//! # Ok::<(), formula_forge::FormulaError>(())
//! ```
//!
//! Custom tables are loaded through [`io::read_table`]:
//!
//! ```
//! use formula_forge::io::{TableFormat, read_table};
//! use formula_forge::{DuplicatePolicy, evaluate, Config};
//!
//! let text = "H 1\nO 8\n";
//! let table = read_table(text.as_bytes(), TableFormat::Text, DuplicatePolicy::Reject)?;
//! let eval = evaluate("H2O2", &table, &Config::default()).expect("valid formula");
//! assert_eq!(eval.protons, 18);
//! # Ok::<(), formula_forge::io::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] : periodic table ingestion, formula streams, result writing
//! - [`tokenize`], [`expand`], [`proton_sum`] : the three pipeline stages
//! - [`evaluate`] and [`process`] : the whole pipeline for one formula
//!
//! # Data Types
//!
//! - [`ElementTable`] : immutable symbol to atomic number mapping
//! - [`Token`] : element, multiplier, or group marker with its byte offset
//! - [`ExpandedSequence`] : the flat atom list a formula stands for
//! - [`Evaluation`] : tokens, atoms and proton sum of one formula
//! - [`Stack`] : the LIFO store used by the expander
//!
//! ## Configuration
//!
//! - [`Config`] : evaluation settings
//! - [`UnknownElementPolicy`] : zero or reject for atoms missing a number
//! - [`DuplicatePolicy`] : first-wins or reject for repeated table symbols
//! - [`Mode`] : expand, protons, or verify

mod formula;
mod model;

pub mod io;

pub use model::sequence::ExpandedSequence;
pub use model::table::{DuplicatePolicy, ElementTable, MAX_SYMBOL_LEN, TableError};
pub use model::token::{Token, reconstruct};

pub use formula::{
    Config, Evaluation, Imbalance, MalformedKind, Mode, Stack, UnknownElementPolicy,
    check_balance, evaluate, expand, is_balanced, process, proton_sum, tokenize,
};

pub use formula::Error as FormulaError;
