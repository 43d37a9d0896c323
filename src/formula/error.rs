//! Error types for formula processing.
//!
//! Every variant is scoped to a single formula: callers report it together
//! with the offending formula and move on to the next one.

use thiserror::Error;

/// Errors that can occur while tokenizing, expanding or summing one formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No element symbol of any length matches at `pos`.
    #[error("no element symbol matches '{ch}' at offset {pos}")]
    UnmatchedSymbol { pos: usize, ch: char },

    /// Structural problem with groups or multipliers.
    #[error("malformed formula at offset {pos}: {kind}")]
    Malformed { pos: usize, kind: MalformedKind },

    /// An expanded atom has no entry in the element table.
    ///
    /// Only raised under [`UnknownElementPolicy::Reject`](super::UnknownElementPolicy::Reject).
    #[error("element '{symbol}' is not in the element table")]
    UnknownElement { symbol: String },

    /// The proton count does not fit in a `u64`.
    #[error("proton count overflows a 64-bit integer")]
    ProtonOverflow,

    /// Growing the expansion buffer failed.
    #[error("cannot allocate room for {requested} atoms while expanding offset {pos}")]
    Allocation { pos: usize, requested: usize },
}

/// The specific structural defect behind [`Error::Malformed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedKind {
    #[error("')' has no matching '('")]
    UnmatchedClose,

    #[error("'(' is never closed")]
    UnclosedGroup,

    #[error("multiplier does not follow an element or a group")]
    DanglingMultiplier,

    #[error("multiplier does not fit in a 64-bit integer")]
    MultiplierOverflow,
}

impl Error {
    pub fn malformed(pos: usize, kind: MalformedKind) -> Self {
        Self::Malformed { pos, kind }
    }

    /// Byte offset of the problem within the formula, if it has one.
    pub fn position(&self) -> Option<usize> {
        match *self {
            Self::UnmatchedSymbol { pos, .. }
            | Self::Malformed { pos, .. }
            | Self::Allocation { pos, .. } => Some(pos),
            Self::UnknownElement { .. } | Self::ProtonOverflow => None,
        }
    }
}
