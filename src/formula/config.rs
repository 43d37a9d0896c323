use std::fmt;

/// Settings that change how a formula is evaluated.
///
/// # Examples
///
/// ```
/// use formula_forge::{Config, UnknownElementPolicy};
///
/// let strict = Config {
///     unknown_elements: UnknownElementPolicy::Reject,
/// };
/// assert_ne!(strict.unknown_elements, Config::default().unknown_elements);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How the proton sum treats atoms missing from the element table.
    pub unknown_elements: UnknownElementPolicy,
}

/// How [`proton_sum`](super::proton_sum) treats atoms with no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownElementPolicy {
    /// Count as zero protons and log a warning.
    #[default]
    Zero,
    /// Fail with [`Error::UnknownElement`](super::Error::UnknownElement).
    Reject,
}

/// The kind of result requested for each formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Space-separated expanded atom list.
    Expand,
    /// Total proton count.
    Protons,
    /// `true`/`false` parenthesis balance verdict.
    Verify,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Expand => write!(f, "expand"),
            Mode::Protons => write!(f, "protons"),
            Mode::Verify => write!(f, "verify"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_masks_unknown_elements() {
        let config = Config::default();
        assert_eq!(config.unknown_elements, UnknownElementPolicy::Zero);
    }

    #[test]
    fn mode_names() {
        assert_eq!(Mode::Expand.to_string(), "expand");
        assert_eq!(Mode::Protons.to_string(), "protons");
        assert_eq!(Mode::Verify.to_string(), "verify");
    }
}
