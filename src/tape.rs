//! This module defines the `Tape` struct, a single storage track of the machine with its
//! own head and boundary policy.
//!
//! A tape may be unbounded on either side. An infinite side grows by one blank cell
//! whenever the head walks past it. A finite side is marked by the [`SYMBOL_EOF`]
//! sentinel: the left end at position 0, the right end at `right_bound - 1`. Heads are
//! clamped at a sentinel and writes onto a sentinel cell are dropped, so the sentinel
//! stays in place for the lifetime of the tape.

use crate::config::TapeConfig;
use crate::types::{MachineError, Symbol, SYMBOL_EOF};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, trace};

/// A single tape with its read/write head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    head: usize,
    left_infinite: bool,
    right_infinite: bool,
    right_bound: Option<usize>,
    /// Index of the right sentinel cell. Follows the cell when the tape grows on the left.
    right_end: Option<usize>,
    blank: Symbol,
    description: String,
}

impl Tape {
    /// Builds a tape from its configuration, using `blank` for empty cells.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::Configuration` if a right-finite tape has no bound or a
    /// zero bound, if the initial contents do not fit inside the bound, or if the
    /// initial head lies outside the initial contents.
    pub fn new(config: &TapeConfig, blank: &str) -> Result<Self, MachineError> {
        let mut cells: VecDeque<Symbol> = config.contents.iter().cloned().collect();
        if cells.is_empty() {
            cells.push_back(blank.to_string());
        }

        let mut tape = Self {
            cells,
            head: config.head,
            left_infinite: config.left_infinite,
            right_infinite: config.right_infinite,
            right_bound: config.right_bound,
            right_end: None,
            blank: blank.to_string(),
            description: config.description.clone(),
        };

        tape.initialize_boundary()?;

        if tape.head >= tape.cells.len() {
            return Err(MachineError::Configuration(format!(
                "Head position {} is outside of tape '{}' with {} cells",
                tape.head,
                tape.description,
                tape.cells.len()
            )));
        }

        Ok(tape)
    }

    /// Writes the end-of-tape sentinels of the finite sides.
    fn initialize_boundary(&mut self) -> Result<(), MachineError> {
        if !self.right_infinite {
            let bound = match self.right_bound {
                Some(0) => {
                    return Err(MachineError::Configuration(
                        "The right bound of a right-finite tape must be greater than 0".into(),
                    ))
                }
                Some(bound) => bound,
                None => {
                    return Err(MachineError::Configuration(
                        "A right-finite tape requires a right bound".into(),
                    ))
                }
            };

            if self.cells.len() > bound {
                return Err(MachineError::Configuration(format!(
                    "Tape contents ({} cells) exceed the right bound of {bound}",
                    self.cells.len()
                )));
            }

            self.cells.resize(bound, self.blank.clone());
            self.cells[bound - 1] = SYMBOL_EOF.to_string();
            self.right_end = Some(bound - 1);
        }

        if !self.left_infinite {
            self.cells[0] = SYMBOL_EOF.to_string();
        }

        Ok(())
    }

    /// Returns the symbol under the head. An empty cell reads as the blank symbol.
    pub fn read(&self) -> &str {
        let cell = &self.cells[self.head];
        if cell.is_empty() {
            &self.blank
        } else {
            cell
        }
    }

    /// Writes `symbol` under the head, unless the head rests on a sentinel cell.
    pub fn write(&mut self, symbol: &str) {
        if self.is_sentinel(self.head) {
            debug!(position = self.head, symbol, "Ignoring write onto end of tape");
            return;
        }

        self.cells[self.head] = symbol.to_string();
    }

    /// Moves the head one cell to the right, growing an infinite tape as needed.
    pub fn move_right(&mut self) {
        match self.right_end {
            Some(end) => {
                if self.head < end {
                    self.head += 1;
                }
            }
            None => {
                if self.head + 1 == self.cells.len() {
                    self.cells.push_back(self.blank.clone());
                }
                self.head += 1;
            }
        }

        trace!(head = self.head, len = self.cells.len(), "Moved right");
    }

    /// Moves the head one cell to the left, growing an infinite tape as needed.
    ///
    /// Growing on the left prepends a blank cell, so the head stays at index 0 and
    /// every other cell shifts one index to the right.
    pub fn move_left(&mut self) {
        if self.head > 0 {
            self.head -= 1;
        } else if self.left_infinite {
            self.cells.push_front(self.blank.clone());
            if let Some(end) = self.right_end.as_mut() {
                *end += 1;
            }
        }

        trace!(head = self.head, len = self.cells.len(), "Moved left");
    }

    fn is_sentinel(&self, index: usize) -> bool {
        (!self.left_infinite && index == 0) || self.right_end == Some(index)
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the raw cells of the tape.
    pub fn cells(&self) -> &VecDeque<Symbol> {
        &self.cells
    }

    /// Returns the symbols of the tape, with empty cells read as blank.
    pub fn symbols(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    self.blank.as_str()
                } else {
                    cell.as_str()
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn blank(&self) -> &str {
        &self.blank
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_left_infinite(&self) -> bool {
        self.left_infinite
    }

    pub fn is_right_infinite(&self) -> bool {
        self.right_infinite
    }

    /// Returns the configured right bound. Only meaningful for a right-finite tape.
    pub fn right_bound(&self) -> Option<usize> {
        self.right_bound
    }
}

/// Renders the tape symbols separated by spaces, with the head cell in brackets.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols().into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if i == self.head {
                write!(f, "[{symbol}]")?;
            } else {
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
