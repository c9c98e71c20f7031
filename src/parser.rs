//! This module provides the parser for transition programs, utilizing the `pest` crate.
//!
//! A program holds one rule per line:
//!
//! ```text
//! <state> ; <symbol>[, <symbol>]* -> <command>[, <command>]* ; <state>
//! ```
//!
//! Each line is tokenized by the grammar in `grammar.pest` and then checked against the
//! machine's [`Vocabulary`]: its states, its alphabet and the blank symbol of every tape.
//! A failure on any line fails the whole call, so callers either get every rule of the
//! text or none of them.

use crate::transition::{Pattern, TransitionRule};
use crate::types::{Command, Direction, MachineError, State, Symbol};
use pest::{error::LineColLocation, iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the program line grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct ProgramParser;

/// Everything a program line is validated against.
#[derive(Debug, Clone)]
pub struct Vocabulary<'a> {
    pub alphabet: &'a [Symbol],
    pub states: &'a [State],
    pub final_states: &'a [State],
    pub ignore: &'a str,
    /// The blank symbol of each tape, in tape order.
    pub blanks: Vec<&'a str>,
}

impl Vocabulary<'_> {
    fn is_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    fn is_final(&self, state: &str) -> bool {
        self.final_states.iter().any(|s| s == state)
    }

    /// Whether `symbol` may be written to a tape whose blank is `blank`.
    fn is_writable(&self, symbol: &str, blank: &str) -> bool {
        symbol == blank || self.alphabet.iter().any(|s| s == symbol)
    }
}

/// Parses program text into transition rules, in line order.
///
/// Empty lines are skipped but still count for line numbers.
///
/// # Errors
///
/// * `MachineError::Configuration` if the vocabulary has no tapes.
/// * `MachineError::Syntax` for the first malformed or invalid line.
pub fn parse(input: &str, vocabulary: &Vocabulary) -> Result<Vec<TransitionRule>, MachineError> {
    if vocabulary.blanks.is_empty() {
        return Err(MachineError::Configuration(
            "Configure the tapes before parsing a program".into(),
        ));
    }

    let mut rules = Vec::new();

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        let root = ProgramParser::parse(Rule::line, text)
            .map_err(|e| grammar_error(e, line))?
            .next()
            .ok_or_else(|| MachineError::syntax("Empty parse tree", line))?;

        if let Some(transition) = root.into_inner().find(|p| p.as_rule() == Rule::transition) {
            rules.push(parse_transition(transition, vocabulary, line)?);
        }
    }

    Ok(rules)
}

/// Builds a checked `TransitionRule` from a `Pair<Rule::transition>`.
fn parse_transition(
    pair: Pair<Rule>,
    vocabulary: &Vocabulary,
    line: usize,
) -> Result<TransitionRule, MachineError> {
    let mut pairs = pair.into_inner();
    let mut next = |expected: &str| {
        pairs
            .next()
            .ok_or_else(|| MachineError::syntax(format!("Missing {expected}"), line))
    };

    let require_state = next("state")?.as_str();
    let symbols = tokens(next("symbols")?);
    let commands = tokens(next("commands")?);
    let new_state = next("next state")?.as_str();

    if !vocabulary.is_state(require_state) {
        return Err(MachineError::syntax(
            format!("Rule starts in unknown state '{require_state}'"),
            line,
        ));
    }
    if vocabulary.is_final(require_state) {
        return Err(MachineError::syntax(
            format!("Rule may not start in final state '{require_state}'"),
            line,
        ));
    }

    let tape_count = vocabulary.blanks.len();

    if symbols.len() != tape_count {
        return Err(MachineError::syntax(
            format!(
                "Expected {tape_count} symbol(s), one per tape, found {}",
                symbols.len()
            ),
            line,
        ));
    }
    let patterns = symbols
        .iter()
        .zip(&vocabulary.blanks)
        .map(|(symbol, blank)| parse_pattern(symbol, blank, vocabulary, line))
        .collect::<Result<Vec<_>, _>>()?;

    if commands.len() != tape_count {
        return Err(MachineError::syntax(
            format!(
                "Expected {tape_count} command(s), one per tape, found {}",
                commands.len()
            ),
            line,
        ));
    }
    let commands = commands
        .iter()
        .zip(&vocabulary.blanks)
        .map(|(command, blank)| parse_command(command, blank, vocabulary, line))
        .collect::<Result<Vec<_>, _>>()?;

    if !vocabulary.is_state(new_state) {
        return Err(MachineError::syntax(
            format!("Rule leads to unknown state '{new_state}'"),
            line,
        ));
    }

    Ok(TransitionRule::new(
        require_state,
        patterns,
        commands,
        new_state,
    ))
}

/// Collects the token texts of a `symbols` or `commands` pair.
fn tokens(pair: Pair<Rule>) -> Vec<&str> {
    pair.into_inner().map(|p| p.as_str()).collect()
}

/// Parses a required symbol. The ignore token becomes a wildcard.
fn parse_pattern(
    symbol: &str,
    blank: &str,
    vocabulary: &Vocabulary,
    line: usize,
) -> Result<Pattern, MachineError> {
    if symbol == vocabulary.ignore {
        return Ok(Pattern::Any(symbol.to_string()));
    }

    if vocabulary.is_writable(symbol, blank) {
        return Ok(Pattern::Symbol(symbol.to_string()));
    }

    Err(MachineError::syntax(
        format!("Symbol '{symbol}' is not allowed"),
        line,
    ))
}

/// Parses a one or two character command.
///
/// `R`, `L` and `N` move right, left or not at all. `R<sym>` and `L<sym>` write `<sym>`
/// and move; `W<sym>` writes without moving.
fn parse_command(
    command: &str,
    blank: &str,
    vocabulary: &Vocabulary,
    line: usize,
) -> Result<Command, MachineError> {
    let unknown = || MachineError::syntax(format!("Unknown command '{command}'"), line);

    let mut chars = command.chars();
    let op = chars.next().ok_or_else(unknown)?;
    let payload = chars.as_str();

    if payload.chars().count() > 1 {
        return Err(unknown());
    }

    if payload.is_empty() {
        return match op {
            'R' => Ok(Command::moving(Direction::Right)),
            'L' => Ok(Command::moving(Direction::Left)),
            'N' => Ok(Command::moving(Direction::Stay)),
            _ => Err(unknown()),
        };
    }

    let direction = match op {
        'R' => Direction::Right,
        'L' => Direction::Left,
        'W' => Direction::Stay,
        _ => return Err(unknown()),
    };

    if !vocabulary.is_writable(payload, blank) {
        return Err(MachineError::syntax(
            format!("Symbol '{payload}' in command '{command}' may not be written"),
            line,
        ));
    }

    Ok(Command::writing(payload, direction))
}

/// Converts a grammar failure into a syntax error on `line`.
fn grammar_error(error: pest::error::Error<Rule>, line: usize) -> MachineError {
    let column = match error.line_col {
        LineColLocation::Pos((_, column)) | LineColLocation::Span((_, column), _) => column,
    };

    MachineError::syntax(
        format!(
            "Malformed rule at column {column}: {}",
            error.variant.message()
        ),
        line,
    )
}
