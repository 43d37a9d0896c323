use thiserror::Error;

/// Why a formula's parentheses do not balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Imbalance {
    #[error("')' at offset {pos} closes nothing")]
    UnexpectedClose { pos: usize },

    #[error("'(' at offset {pos} is never closed")]
    Unclosed { pos: usize },
}

impl Imbalance {
    pub fn position(&self) -> usize {
        match *self {
            Self::UnexpectedClose { pos } | Self::Unclosed { pos } => pos,
        }
    }
}

/// Checks that every `)` closes an earlier `(` and nothing stays open.
///
/// Only parentheses are looked at; symbols and digits are not validated.
pub fn check_balance(formula: &str) -> Result<(), Imbalance> {
    let mut open = Vec::new();

    for (pos, byte) in formula.bytes().enumerate() {
        match byte {
            b'(' => open.push(pos),
            b')' => {
                if open.pop().is_none() {
                    return Err(Imbalance::UnexpectedClose { pos });
                }
            }
            _ => {}
        }
    }

    match open.first() {
        Some(&pos) => Err(Imbalance::Unclosed { pos }),
        None => Ok(()),
    }
}

pub fn is_balanced(formula: &str) -> bool {
    check_balance(formula).is_ok()
}
