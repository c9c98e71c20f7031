//! This module defines the core data structures and types shared across the simulator,
//! including reserved symbols, tape commands, execution outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single tape symbol. Symbols are tokens and may span more than one character.
pub type Symbol = String;
/// The name of a machine state.
pub type State = String;

/// The sentinel written to the boundary cell of a finite tape.
pub const SYMBOL_EOF: &str = "eof";
/// The default blank symbol used for empty tape cells.
pub const DEFAULT_BLANK_SYMBOL: &str = "_";
/// The default token that lets a rule accept any symbol on a tape.
pub const DEFAULT_IGNORE_SYMBOL: &str = "-";

/// Represents the possible directions a tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

/// A single per-tape command of a transition rule.
///
/// Textually a command is one of `R`, `L`, `N`, or a two character form `R<sym>`,
/// `L<sym>`, `W<sym>` which writes `<sym>` before moving (`W` writes without moving).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The symbol to write under the head before moving, if any.
    pub write: Option<Symbol>,
    /// The head movement applied after the write.
    pub direction: Direction,
}

impl Command {
    /// A command that only moves the head.
    pub fn moving(direction: Direction) -> Self {
        Self {
            write: None,
            direction,
        }
    }

    /// A command that writes `symbol` and then moves the head.
    pub fn writing(symbol: impl Into<Symbol>, direction: Direction) -> Self {
        Self {
            write: Some(symbol.into()),
            direction,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.write, self.direction) {
            (None, Direction::Right) => write!(f, "R"),
            (None, Direction::Left) => write!(f, "L"),
            (None, Direction::Stay) => write!(f, "N"),
            (Some(symbol), Direction::Right) => write!(f, "R{symbol}"),
            (Some(symbol), Direction::Left) => write!(f, "L{symbol}"),
            (Some(symbol), Direction::Stay) => write!(f, "W{symbol}"),
        }
    }
}

/// Represents the outcome of a single machine iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A rule was applied and the machine can keep running.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

/// The reason a machine stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The current state is one of the final states.
    Accepted,
    /// No rule matches the current state and symbols.
    Stuck,
}

impl Halt {
    /// Returns `true` for an accepting halt.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Halt::Accepted)
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::Accepted => write!(f, "accepted"),
            Halt::Stuck => write!(f, "stuck"),
        }
    }
}

/// Represents the errors raised while configuring, parsing, or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The machine or one of its tapes was configured inconsistently.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A program line is malformed or refers to unknown states or symbols.
    #[error("Syntax error on line {line}: {message}")]
    Syntax { message: String, line: usize },
    /// An execution invariant was violated. Validated programs never raise this.
    #[error("Runtime error: {0}")]
    Runtime(String),
    /// A configuration file could not be read or decoded.
    #[error("File error: {0}")]
    File(String),
}

impl MachineError {
    pub(crate) fn syntax(message: impl Into<String>, line: usize) -> Self {
        MachineError::Syntax {
            message: message.into(),
            line,
        }
    }

    /// Returns the 1-based program line of a syntax error.
    pub fn line(&self) -> Option<usize> {
        match self {
            MachineError::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let stay_json = serde_json::to_string(&Direction::Stay).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(stay_json, "\"Stay\"");

        let stay: Direction = serde_json::from_str(&stay_json).unwrap();
        assert_eq!(stay, Direction::Stay);
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::moving(Direction::Right).to_string(), "R");
        assert_eq!(Command::moving(Direction::Stay).to_string(), "N");
        assert_eq!(Command::writing("a", Direction::Left).to_string(), "La");
        assert_eq!(Command::writing("_", Direction::Stay).to_string(), "W_");
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::syntax("Unknown state 'q9'", 3);

        assert_eq!(error.line(), Some(3));
        assert_eq!(
            error.to_string(),
            "Syntax error on line 3: Unknown state 'q9'"
        );
        assert_eq!(MachineError::Runtime("bad".into()).line(), None);
    }
}
