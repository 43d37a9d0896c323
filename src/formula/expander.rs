use super::error::{Error, MalformedKind};
use super::stack::Stack;
use crate::model::sequence::ExpandedSequence;
use crate::model::token::Token;

/// Output stack entry: a resolved atom or the marker left by `(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot<'a> {
    Atom(&'a str),
    Open(usize),
}

/// Multiplies out every element and group multiplier in `tokens`.
///
/// Single pass over the tokens with one output stack:
///
/// - an element is pushed;
/// - a multiplier right after an element pops that atom and pushes it back
///   `n` times;
/// - `(` pushes a marker;
/// - `)` pops atoms down to the nearest marker into a group, takes the
///   multiplier that immediately follows (or 1), and pushes the group back
///   `n` times, keeping its internal order on every repetition.
///
/// The stack read bottom to top is the result. Because the group is gathered
/// in pop order and pushed back from its far end, atoms come out in the order
/// they are written: `Ca3(PO4)2` gives `Ca Ca Ca P O O O O P O O O O`.
///
/// # Errors
///
/// [`Error::Malformed`] for a `)` with no open group, a `(` still open at the
/// end, or a multiplier that follows neither an element nor a `)`;
/// [`Error::Allocation`] when a repetition cannot be allocated.
pub fn expand<'a>(tokens: &[Token<'a>]) -> Result<ExpandedSequence<'a>, Error> {
    let mut output: Stack<Slot<'a>> = Stack::with_capacity(tokens.len());
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut previous: Option<&Token<'a>> = None;
    let mut tokens = tokens.iter().peekable();

    while let Some(token) = tokens.next() {
        let mut last = token;

        match *token {
            Token::Element { symbol, .. } => output.push(Slot::Atom(symbol)),

            Token::Number { value, pos, .. } => {
                let Some(Token::Element { .. }) = previous else {
                    return Err(Error::malformed(pos, MalformedKind::DanglingMultiplier));
                };
                let Some(Slot::Atom(atom)) = output.pop() else {
                    return Err(Error::malformed(pos, MalformedKind::DanglingMultiplier));
                };
                push_repeated(&mut output, &[atom], value, pos)?;
            }

            Token::GroupOpen(pos) => {
                output.push(Slot::Open(pos));
                depth += 1;
                max_depth = max_depth.max(depth);
            }

            Token::GroupClose(pos) => {
                if depth == 0 {
                    return Err(Error::malformed(pos, MalformedKind::UnmatchedClose));
                }
                let group = collect_group(&mut output, pos)?;
                depth -= 1;

                let mut times = 1;
                if let Some(multiplier) = tokens.next_if(|t| matches!(t, Token::Number { .. })) {
                    if let Token::Number { value, .. } = *multiplier {
                        times = value;
                    }
                    last = multiplier;
                }
                push_repeated(&mut output, &group, times, pos)?;
            }
        }

        previous = Some(last);
    }

    let slots = output.into_vec();
    if let Some(pos) = slots.iter().find_map(|slot| match *slot {
        Slot::Open(pos) => Some(pos),
        Slot::Atom(_) => None,
    }) {
        return Err(Error::malformed(pos, MalformedKind::UnclosedGroup));
    }

    let sequence: ExpandedSequence<'a> = slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Atom(atom) => Some(atom),
            Slot::Open(_) => None,
        })
        .collect();

    tracing::trace!(atoms = sequence.len(), max_depth, "expanded formula");
    Ok(sequence)
}

/// Pops atoms down to and including the nearest `(` marker. The atoms are
/// returned in pop order, i.e. reversed relative to the source.
fn collect_group<'a>(
    output: &mut Stack<Slot<'a>>,
    close_pos: usize,
) -> Result<Vec<&'a str>, Error> {
    let mut group = Vec::new();
    loop {
        match output.pop() {
            Some(Slot::Atom(atom)) => group.push(atom),
            Some(Slot::Open(_)) => return Ok(group),
            None => return Err(Error::malformed(close_pos, MalformedKind::UnmatchedClose)),
        }
    }
}

/// Pushes `popped` back `times` times. `popped` is in pop order, so each
/// repetition walks it from the end.
fn push_repeated<'a>(
    output: &mut Stack<Slot<'a>>,
    popped: &[&'a str],
    times: u64,
    pos: usize,
) -> Result<(), Error> {
    if popped.is_empty() {
        return Ok(());
    }
    let requested = usize::try_from(times)
        .ok()
        .and_then(|times| times.checked_mul(popped.len()))
        .unwrap_or(usize::MAX);
    output
        .try_reserve(requested)
        .map_err(|_| Error::Allocation { pos, requested })?;

    for _ in 0..times {
        for &atom in popped.iter().rev() {
            output.push(Slot::Atom(atom));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::tokenize;
    use crate::model::table::{DuplicatePolicy, ElementTable};

    fn table() -> ElementTable {
        ElementTable::build(
            [
                ("H", 1),
                ("C", 6),
                ("N", 7),
                ("O", 8),
                ("Na", 11),
                ("Mg", 12),
                ("P", 15),
                ("S", 16),
                ("Cl", 17),
                ("K", 19),
                ("Ca", 20),
                ("Fe", 26),
                ("A", 100),
                ("B", 5),
            ],
            DuplicatePolicy::KeepFirst,
        )
        .unwrap()
    }

    fn expand_str(formula: &str) -> Result<Vec<String>, Error> {
        let table = table();
        let tokens = tokenize(formula, &table)?;
        let seq = expand(&tokens)?;
        Ok(seq.iter().map(str::to_string).collect())
    }

    fn expanded(formula: &str) -> String {
        expand_str(formula).unwrap().join(" ")
    }

    #[test]
    fn single_elements_without_multipliers() {
        assert_eq!(expanded("NaCl"), "Na Cl");
    }

    #[test]
    fn element_multiplier() {
        assert_eq!(expanded("H2O"), "H H O");
        assert_eq!(expanded("C12"), vec!["C"; 12].join(" "));
    }

    #[test]
    fn group_multiplier_keeps_reading_order() {
        assert_eq!(expanded("Ca3(PO4)2"), "Ca Ca Ca P O O O O P O O O O");
        assert_eq!(expanded("Mg(OH)2"), "Mg O H O H");
    }

    #[test]
    fn group_without_multiplier_counts_once() {
        assert_eq!(expanded("Na(OH)"), "Na O H");
    }

    #[test]
    fn nested_groups_compose_multiplicatively() {
        assert_eq!(
            expanded("K4(Fe(CN)6)"),
            "K K K K Fe C N C N C N C N C N C N"
        );
        let atoms = expand_str("((AB)2C)3").unwrap();
        assert_eq!(atoms.len(), 15);
        assert_eq!(atoms[..5].join(""), "ABABC");
    }

    #[test]
    fn sibling_groups() {
        assert_eq!(expanded("(AB)2(CN)"), "A B A B C N");
    }

    #[test]
    fn group_of_three_repeats_six_atoms() {
        let atoms = expand_str("(AB)3").unwrap();
        assert_eq!(atoms.len(), 6);
        assert_eq!(atoms.join(""), "ABABAB");
    }

    #[test]
    fn zero_multiplier_drops_atoms() {
        assert_eq!(expanded("H0O"), "O");
        assert_eq!(expanded("(OH)0Na"), "Na");
    }

    #[test]
    fn empty_group_and_empty_input() {
        assert_eq!(expanded("()3"), "");
        assert_eq!(expanded("()18446744073709551615H"), "H");
        assert_eq!(expanded(""), "");
    }

    #[test]
    fn leading_multiplier_is_malformed() {
        assert_eq!(
            expand_str("2H").unwrap_err(),
            Error::malformed(0, MalformedKind::DanglingMultiplier)
        );
    }

    #[test]
    fn multiplier_after_open_is_malformed() {
        assert_eq!(
            expand_str("(2H)").unwrap_err(),
            Error::malformed(1, MalformedKind::DanglingMultiplier)
        );
    }

    #[test]
    fn consecutive_multipliers_are_malformed() {
        let tokens = [
            Token::Element { symbol: "H", pos: 0 },
            Token::Number {
                value: 2,
                digits: 1,
                pos: 1,
            },
            Token::Number {
                value: 3,
                digits: 1,
                pos: 2,
            },
        ];
        assert_eq!(
            expand(&tokens).unwrap_err(),
            Error::malformed(2, MalformedKind::DanglingMultiplier)
        );
    }

    #[test]
    fn multiplier_after_group_multiplier_is_malformed() {
        let tokens = [
            Token::GroupOpen(0),
            Token::Element { symbol: "H", pos: 1 },
            Token::GroupClose(2),
            Token::Number {
                value: 2,
                digits: 1,
                pos: 3,
            },
            Token::Number {
                value: 4,
                digits: 1,
                pos: 4,
            },
        ];
        assert_eq!(
            expand(&tokens).unwrap_err(),
            Error::malformed(4, MalformedKind::DanglingMultiplier)
        );
    }

    #[test]
    fn unmatched_close_is_malformed() {
        assert_eq!(
            expand_str("H2O)").unwrap_err(),
            Error::malformed(3, MalformedKind::UnmatchedClose)
        );
        assert_eq!(
            expand_str("(H))").unwrap_err(),
            Error::malformed(3, MalformedKind::UnmatchedClose)
        );
    }

    #[test]
    fn unclosed_group_reports_outermost_open() {
        assert_eq!(
            expand_str("Ca(PO4").unwrap_err(),
            Error::malformed(2, MalformedKind::UnclosedGroup)
        );
        assert_eq!(
            expand_str("((H)O").unwrap_err(),
            Error::malformed(0, MalformedKind::UnclosedGroup)
        );
    }

    #[test]
    fn huge_multiplier_fails_allocation() {
        let err = expand_str("(HO)18446744073709551615").unwrap_err();
        assert!(matches!(err, Error::Allocation { pos: 3, .. }));
    }
}
