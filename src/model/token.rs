use std::fmt;

/// A lexical unit of a condensed formula.
///
/// Every variant records `pos`, the byte offset of its first character in the
/// source formula. Element symbols borrow from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A symbol resolved against the element table.
    Element { symbol: &'a str, pos: usize },
    /// A multiplier; `digits` is the width of the source digit run.
    Number { value: u64, digits: usize, pos: usize },
    GroupOpen(usize),
    GroupClose(usize),
}

impl Token<'_> {
    pub fn pos(&self) -> usize {
        match *self {
            Token::Element { pos, .. } | Token::Number { pos, .. } => pos,
            Token::GroupOpen(pos) | Token::GroupClose(pos) => pos,
        }
    }

    /// Number of source bytes covered by this token.
    pub fn width(&self) -> usize {
        match *self {
            Token::Element { symbol, .. } => symbol.len(),
            Token::Number { digits, .. } => digits,
            Token::GroupOpen(_) | Token::GroupClose(_) => 1,
        }
    }

    /// The literal source text of this token.
    ///
    /// Multipliers are zero-padded to their original width, so `H02`
    /// reconstructs as `H02` rather than `H2`.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// `true` when two tokens have the same kind and payload, ignoring
    /// positions.
    pub fn same_kind(&self, other: &Token<'_>) -> bool {
        match (self, other) {
            (Token::Element { symbol: a, .. }, Token::Element { symbol: b, .. }) => a == b,
            (
                Token::Number {
                    value: a,
                    digits: da,
                    ..
                },
                Token::Number {
                    value: b,
                    digits: db,
                    ..
                },
            ) => a == b && da == db,
            (Token::GroupOpen(_), Token::GroupOpen(_)) => true,
            (Token::GroupClose(_), Token::GroupClose(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Token::Element { symbol, .. } => f.write_str(symbol),
            Token::Number { value, digits, .. } => write!(f, "{value:0>digits$}"),
            Token::GroupOpen(_) => f.write_str("("),
            Token::GroupClose(_) => f.write_str(")"),
        }
    }
}

/// Concatenates the literal text of `tokens` in order.
pub fn reconstruct(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::text).collect()
}
