//! This crate provides the core of a configurable multi-tape Turing machine simulator.
//! It includes modules for describing tapes and machines, parsing and validating
//! transition programs, and executing them with a pluggable tie-break for
//! nondeterministic programs.

pub mod chooser;
pub mod config;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod program;
pub mod tape;
pub mod transition;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the tie-break trait and its random implementation.
pub use chooser::{RandomChooser, RuleChooser};
/// Re-exports the machine and tape configuration types.
pub use config::{MachineConfig, TapeConfig};
/// Re-exports the `ConfigLoader` struct from the loader module.
pub use loader::ConfigLoader;
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the `Program` struct from the program module.
pub use program::Program;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the transition rule types.
pub use transition::{Pattern, TransitionRule};
/// Re-exports various types related to machine execution from the types module.
pub use types::{
    Command, Direction, Halt, MachineError, State, Step, Symbol, DEFAULT_BLANK_SYMBOL,
    DEFAULT_IGNORE_SYMBOL, SYMBOL_EOF,
};
