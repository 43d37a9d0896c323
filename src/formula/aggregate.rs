use std::collections::BTreeSet;

use super::config::UnknownElementPolicy;
use super::error::Error;
use crate::model::sequence::ExpandedSequence;
use crate::model::table::ElementTable;

/// Sums the atomic numbers of every atom in `sequence`.
///
/// Atoms missing from `table` count as zero under
/// [`UnknownElementPolicy::Zero`] (one warning per distinct symbol) and fail
/// with [`Error::UnknownElement`] under [`UnknownElementPolicy::Reject`].
pub fn proton_sum(
    sequence: &ExpandedSequence<'_>,
    table: &ElementTable,
    policy: UnknownElementPolicy,
) -> Result<u64, Error> {
    let mut total: u64 = 0;
    let mut unknown = BTreeSet::new();

    for atom in sequence.iter() {
        let protons = match table.lookup(atom) {
            Some(number) => number,
            None => match policy {
                UnknownElementPolicy::Zero => {
                    if unknown.insert(atom) {
                        tracing::warn!(symbol = atom, "unknown element counted as zero protons");
                    }
                    0
                }
                UnknownElementPolicy::Reject => {
                    return Err(Error::UnknownElement {
                        symbol: atom.to_string(),
                    });
                }
            },
        };
        total = total
            .checked_add(u64::from(protons))
            .ok_or(Error::ProtonOverflow)?;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::DuplicatePolicy;

    fn table() -> ElementTable {
        ElementTable::build(
            [("H", 1), ("O", 8), ("P", 15), ("Ca", 20)],
            DuplicatePolicy::KeepFirst,
        )
        .unwrap()
    }

    #[test]
    fn water_has_ten_protons() {
        let seq = ExpandedSequence::from(vec!["H", "H", "O"]);
        assert_eq!(proton_sum(&seq, &table(), UnknownElementPolicy::Zero), Ok(10));
    }

    #[test]
    fn calcium_phosphate() {
        let mut atoms = vec!["Ca"; 3];
        for _ in 0..2 {
            atoms.push("P");
            atoms.extend(["O"; 4]);
        }
        let seq = ExpandedSequence::from(atoms);
        assert_eq!(proton_sum(&seq, &table(), UnknownElementPolicy::Zero), Ok(154));
    }

    #[test]
    fn empty_sequence_sums_to_zero() {
        let seq = ExpandedSequence::new();
        assert_eq!(proton_sum(&seq, &table(), UnknownElementPolicy::Reject), Ok(0));
    }

    #[test]
    fn unknown_atoms_count_zero_by_default() {
        let seq = ExpandedSequence::from(vec!["H", "Xx", "Xx", "O"]);
        assert_eq!(proton_sum(&seq, &table(), UnknownElementPolicy::Zero), Ok(9));
    }

    #[test]
    fn unknown_atoms_rejected_when_strict() {
        let seq = ExpandedSequence::from(vec!["H", "Xx"]);
        assert_eq!(
            proton_sum(&seq, &table(), UnknownElementPolicy::Reject),
            Err(Error::UnknownElement {
                symbol: "Xx".into()
            })
        );
    }
}
