use std::collections::BTreeMap;
use std::fmt;

/// The fully multiplied-out atom list of one formula.
///
/// `H2O` expands to `[H, H, O]`. Symbols borrow from the source formula.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSequence<'a> {
    atoms: Vec<&'a str>,
}

impl<'a> ExpandedSequence<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.atoms.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.atoms
    }

    /// Atom multiset, keyed by symbol.
    pub fn counts(&self) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(*atom).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> From<Vec<&'a str>> for ExpandedSequence<'a> {
    fn from(atoms: Vec<&'a str>) -> Self {
        Self { atoms }
    }
}

impl<'a> FromIterator<&'a str> for ExpandedSequence<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

/// Symbols joined by single spaces.
impl fmt::Display for ExpandedSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut atoms = self.atoms.iter();
        if let Some(first) = atoms.next() {
            f.write_str(first)?;
            for atom in atoms {
                write!(f, " {atom}")?;
            }
        }
        Ok(())
    }
}
