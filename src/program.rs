//! The ordered rule set of a machine.

use crate::transition::TransitionRule;
use std::fmt;

/// An ordered collection of transition rules.
///
/// Rule order carries no meaning for execution: every rule matching a snapshot is
/// collected before one of them is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    rules: Vec<TransitionRule>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends already validated rules, keeping their order.
    pub(crate) fn extend(&mut self, rules: Vec<TransitionRule>) {
        self.rules.extend(rules);
    }

    /// Returns the indices of every rule matching the snapshot `(state, symbols)`.
    pub fn matching<S: AsRef<str>>(&self, state: &str, symbols: &[S]) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(state, symbols))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Lists one rule per line in program syntax.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
