//! Transition rules: immutable `(state, symbols) -> (commands, state)` associations.

use crate::types::{Command, State, Symbol};
use std::fmt;

/// A required symbol of a rule, one per tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches exactly this symbol.
    Symbol(Symbol),
    /// Matches any symbol. Holds the ignore token it was written with.
    Any(Symbol),
}

impl Pattern {
    pub fn matches(&self, symbol: &str) -> bool {
        match self {
            Pattern::Symbol(expected) => expected == symbol,
            Pattern::Any(_) => true,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Symbol(symbol) | Pattern::Any(symbol) => write!(f, "{symbol}"),
        }
    }
}

/// Represents a single transition rule of a multi-tape machine.
///
/// A rule fires when the machine is in `require_state` and every tape reads a symbol
/// accepted by the corresponding pattern. Applying it runs one command per tape and
/// moves the machine to `new_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRule {
    require_state: State,
    symbols: Vec<Pattern>,
    commands: Vec<Command>,
    new_state: State,
}

impl TransitionRule {
    pub fn new(
        require_state: impl Into<State>,
        symbols: Vec<Pattern>,
        commands: Vec<Command>,
        new_state: impl Into<State>,
    ) -> Self {
        Self {
            require_state: require_state.into(),
            symbols,
            commands,
            new_state: new_state.into(),
        }
    }

    pub fn require_state(&self) -> &str {
        &self.require_state
    }

    pub fn symbols(&self) -> &[Pattern] {
        &self.symbols
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn new_state(&self) -> &str {
        &self.new_state
    }

    /// Returns `true` if the rule applies to the machine snapshot `(state, symbols)`.
    pub fn matches<S: AsRef<str>>(&self, state: &str, symbols: &[S]) -> bool {
        self.require_state == state
            && self.symbols.len() == symbols.len()
            && self
                .symbols
                .iter()
                .zip(symbols)
                .all(|(pattern, symbol)| pattern.matches(symbol.as_ref()))
    }
}

/// Formats the rule in program syntax, e.g. `q0; a, - -> Rb, N; q1`.
impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self
            .symbols
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let commands = self
            .commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        write!(
            f,
            "{}; {} -> {}; {}",
            self.require_state, symbols, commands, self.new_state
        )
    }
}
