//! Condensed formula processing: tokenize, expand, sum.
//!
//! Each formula flows through three stages that share nothing but a
//! read-only [`ElementTable`]:
//!
//! 1. [`tokenize`] – resolves symbols by greedy longest match against the table.
//! 2. [`expand`] – multiplies out element and group multipliers with an
//!    explicit [`Stack`].
//! 3. [`proton_sum`] – adds up atomic numbers of the expanded atoms.
//!
//! [`evaluate`] runs all three; [`process`] renders the one-line result for a
//! [`Mode`]. The parenthesis checker ([`check_balance`]) stands apart and
//! never consults the table.

mod aggregate;
mod balance;
mod config;
mod error;
mod expander;
mod stack;
mod tokenizer;

pub use aggregate::proton_sum;
pub use balance::{Imbalance, check_balance, is_balanced};
pub use config::{Config, Mode, UnknownElementPolicy};
pub use error::{Error, MalformedKind};
pub use expander::expand;
pub use stack::Stack;
pub use tokenizer::tokenize;

use crate::model::sequence::ExpandedSequence;
use crate::model::table::ElementTable;
use crate::model::token::Token;

/// Everything derived from one formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation<'a> {
    pub tokens: Vec<Token<'a>>,
    pub atoms: ExpandedSequence<'a>,
    pub protons: u64,
}

impl Evaluation<'_> {
    /// The output line for `mode`. An evaluated formula is always balanced.
    pub fn render(&self, mode: Mode) -> String {
        match mode {
            Mode::Expand => self.atoms.to_string(),
            Mode::Protons => self.protons.to_string(),
            Mode::Verify => true.to_string(),
        }
    }
}

/// Tokenizes, expands and sums `formula`.
///
/// # Examples
///
/// ```
/// use formula_forge::{Config, ElementTable, evaluate};
///
/// let table = ElementTable::builtin();
/// let eval = evaluate("Ca3(PO4)2", table, &Config::default())?;
/// assert_eq!(eval.atoms.len(), 13);
/// assert_eq!(eval.protons, 154);
/// # Ok::<(), formula_forge::FormulaError>(())
/// ```
pub fn evaluate<'a>(
    formula: &'a str,
    table: &ElementTable,
    config: &Config,
) -> Result<Evaluation<'a>, Error> {
    let tokens = tokenize(formula, table)?;
    let atoms = expand(&tokens)?;
    let protons = proton_sum(&atoms, table, config.unknown_elements)?;

    tracing::debug!(
        formula,
        tokens = tokens.len(),
        atoms = atoms.len(),
        protons,
        "evaluated formula"
    );

    Ok(Evaluation {
        tokens,
        atoms,
        protons,
    })
}

/// Produces the single output line for `formula` under `mode`.
///
/// [`Mode::Expand`] stops after expansion, [`Mode::Protons`] runs the full
/// pipeline, and [`Mode::Verify`] only checks parentheses (an imbalance is a
/// `false` verdict, not an error).
pub fn process(
    formula: &str,
    table: &ElementTable,
    mode: Mode,
    config: &Config,
) -> Result<String, Error> {
    match mode {
        Mode::Expand => {
            let tokens = tokenize(formula, table)?;
            Ok(expand(&tokens)?.to_string())
        }
        Mode::Protons => Ok(evaluate(formula, table, config)?.protons.to_string()),
        Mode::Verify => Ok(is_balanced(formula).to_string()),
    }
}
