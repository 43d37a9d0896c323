use super::error::{Error, MalformedKind};
use crate::model::table::ElementTable;
use crate::model::token::Token;

/// Splits `formula` into tokens, left to right.
///
/// Parentheses become group markers, digit runs become multipliers, and
/// everything else must start an element symbol. Symbols are resolved by
/// greedy longest match: lengths from [`ElementTable::max_symbol_len`] down to
/// one are tried and the first table hit wins.
///
/// # Errors
///
/// [`Error::UnmatchedSymbol`] when no symbol length matches at a position, and
/// [`MalformedKind::MultiplierOverflow`] for digit runs beyond `u64`.
pub fn tokenize<'a>(formula: &'a str, table: &ElementTable) -> Result<Vec<Token<'a>>, Error> {
    let bytes = formula.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                tokens.push(Token::GroupOpen(i));
                i += 1;
            }
            b')' => {
                tokens.push(Token::GroupClose(i));
                i += 1;
            }
            b'0'..=b'9' => {
                let (token, next) = read_number(formula, i)?;
                tokens.push(token);
                i = next;
            }
            _ => {
                let symbol = match_symbol(formula, i, table).ok_or_else(|| {
                    Error::UnmatchedSymbol {
                        pos: i,
                        ch: formula[i..]
                            .chars()
                            .next()
                            .unwrap_or(char::REPLACEMENT_CHARACTER),
                    }
                })?;
                tokens.push(Token::Element { symbol, pos: i });
                i += symbol.len();
            }
        }
    }

    tracing::trace!(formula, count = tokens.len(), "tokenized formula");
    Ok(tokens)
}

fn read_number(formula: &str, start: usize) -> Result<(Token<'_>, usize), Error> {
    let end = formula[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(formula.len(), |offset| start + offset);
    let value = formula[start..end]
        .parse::<u64>()
        .map_err(|_| Error::malformed(start, MalformedKind::MultiplierOverflow))?;
    let token = Token::Number {
        value,
        digits: end - start,
        pos: start,
    };
    Ok((token, end))
}

fn match_symbol<'a>(formula: &'a str, start: usize, table: &ElementTable) -> Option<&'a str> {
    let longest = table.max_symbol_len().min(formula.len() - start);
    (1..=longest)
        .rev()
        .filter_map(|len| formula.get(start..start + len))
        .find(|candidate| table.contains(candidate))
}
