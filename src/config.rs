//! Construction-time configuration of a machine and its tapes.
//!
//! Both types are plain `serde` records so they can be loaded from JSON by the
//! [`ConfigLoader`](crate::loader::ConfigLoader). Defaults describe a single
//! alphabet `a, b, c` machine with states `q0, q1, f`, started in `q0` and
//! accepting in `f`.

use crate::types::{
    MachineError, State, Symbol, DEFAULT_BLANK_SYMBOL, DEFAULT_IGNORE_SYMBOL, SYMBOL_EOF,
};
use serde::{Deserialize, Serialize};

/// The configuration of a whole machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// The symbols a program may read and write, besides blank.
    pub alphabet: Vec<Symbol>,
    /// Every state the program may mention.
    pub states: Vec<State>,
    /// The state the machine starts in.
    pub initial_state: State,
    /// Accepting states. No rule may leave one of them.
    pub final_states: Vec<State>,
    /// The symbol of an empty cell.
    pub blank: Symbol,
    /// The wildcard token usable in a rule's required symbols.
    pub ignore: Symbol,
    /// The tapes, in the order their symbols appear in each rule.
    pub tapes: Vec<TapeConfig>,
    /// Program text installed when the machine is built.
    pub program: Option<String>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            alphabet: vec!["a".into(), "b".into(), "c".into()],
            states: vec!["q0".into(), "q1".into(), "f".into()],
            initial_state: "q0".into(),
            final_states: vec!["f".into()],
            blank: DEFAULT_BLANK_SYMBOL.into(),
            ignore: DEFAULT_IGNORE_SYMBOL.into(),
            tapes: Vec::new(),
            program: None,
        }
    }
}

impl MachineConfig {
    /// Checks the machine level settings. Tapes are checked when they are built.
    pub fn validate(&self) -> Result<(), MachineError> {
        check_token("blank symbol", &self.blank)?;
        check_token("ignore token", &self.ignore)?;

        if self.blank == SYMBOL_EOF || self.ignore == SYMBOL_EOF {
            return Err(MachineError::Configuration(format!(
                "'{SYMBOL_EOF}' is reserved for the end of a finite tape"
            )));
        }

        if self.blank == self.ignore {
            return Err(MachineError::Configuration(format!(
                "Blank symbol and ignore token must differ, both are '{}'",
                self.blank
            )));
        }

        for symbol in &self.alphabet {
            check_token("alphabet symbol", symbol)?;

            if [self.blank.as_str(), self.ignore.as_str(), SYMBOL_EOF].contains(&symbol.as_str()) {
                return Err(MachineError::Configuration(format!(
                    "Alphabet symbol '{symbol}' clashes with a reserved symbol"
                )));
            }
        }

        for state in &self.states {
            check_token("state", state)?;
        }

        if !self.states.contains(&self.initial_state) {
            return Err(MachineError::Configuration(format!(
                "Initial state '{}' is not an allowed state",
                self.initial_state
            )));
        }

        if let Some(state) = self
            .final_states
            .iter()
            .find(|state| !self.states.contains(state))
        {
            return Err(MachineError::Configuration(format!(
                "Final state '{state}' is not an allowed state"
            )));
        }

        Ok(())
    }
}

/// The configuration of a single tape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapeConfig {
    pub left_infinite: bool,
    pub right_infinite: bool,
    /// Number of cells of a right-finite tape. The last one holds the end sentinel.
    pub right_bound: Option<usize>,
    /// Initial cells. An empty string stands for a blank cell.
    pub contents: Vec<Symbol>,
    /// Initial head position.
    pub head: usize,
    pub description: String,
}

impl Default for TapeConfig {
    fn default() -> Self {
        Self {
            left_infinite: true,
            right_infinite: true,
            right_bound: None,
            contents: Vec::new(),
            head: 0,
            description: String::new(),
        }
    }
}

impl TapeConfig {
    /// An infinite tape holding the given symbols.
    pub fn new<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Self {
            contents: contents.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// An infinite tape with one single character symbol per cell.
    pub fn from_chars(contents: &str) -> Self {
        Self::new(contents.chars().map(String::from))
    }

    pub fn with_head(mut self, head: usize) -> Self {
        self.head = head;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Makes the tape end at position 0.
    pub fn left_finite(mut self) -> Self {
        self.left_infinite = false;
        self
    }

    /// Makes the tape end after `bound` cells.
    pub fn right_finite(mut self, bound: usize) -> Self {
        self.right_infinite = false;
        self.right_bound = Some(bound);
        self
    }
}

/// Rejects tokens the program grammar could not express.
fn check_token(kind: &str, token: &str) -> Result<(), MachineError> {
    let splits = token.contains("->")
        || token
            .chars()
            .any(|c| c.is_whitespace() || c == ';' || c == ',');

    if token.is_empty() || splits {
        return Err(MachineError::Configuration(format!(
            "Invalid {kind} '{token}': tokens must be non-empty and free of whitespace, ';', ',' and '->'"
        )));
    }

    Ok(())
}
