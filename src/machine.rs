//! This module defines the `Machine` struct, which simulates a configurable multi-tape
//! Turing machine. It owns the tapes and the program, selects the rule matching the
//! current state and symbols, and applies its commands.
//!
//! A machine halts in one of two ways: it *accepts* when it reaches a final state, or it
//! gets *stuck* when no rule matches. Neither is an error. When several rules match, the
//! machine's [`RuleChooser`] picks one, which is the only nondeterminism of a run.
//!
//! [`Machine::run`] has no step limit. Callers that need one use [`Machine::run_for`] or
//! [`Machine::run_while`], or drive [`Machine::tick`] themselves.

use crate::chooser::{RandomChooser, RuleChooser};
use crate::config::{MachineConfig, TapeConfig};
use crate::parser::{self, Vocabulary};
use crate::program::Program;
use crate::tape::Tape;
use crate::transition::{Pattern, TransitionRule};
use crate::types::{Direction, Halt, MachineError, State, Step, Symbol};
use tracing::{debug, info, trace};

/// Represents a multi-tape Turing machine.
#[derive(Debug)]
pub struct Machine<C = RandomChooser> {
    alphabet: Vec<Symbol>,
    states: Vec<State>,
    initial_state: State,
    final_states: Vec<State>,
    blank: Symbol,
    ignore: Symbol,
    tapes: Vec<Tape>,
    initial_tapes: Vec<Tape>,
    program: Program,
    state: State,
    step_count: usize,
    chooser: C,
}

impl Machine<RandomChooser> {
    /// Creates a machine that breaks ties with an entropy seeded random chooser.
    ///
    /// See [`Machine::with_chooser`].
    pub fn new(config: &MachineConfig) -> Result<Self, MachineError> {
        Self::with_chooser(config, RandomChooser::from_entropy())
    }
}

impl<C: RuleChooser> Machine<C> {
    /// Creates a machine from `config`, breaking ties with `chooser`.
    ///
    /// The configured tapes are built and, if the configuration carries program text,
    /// the program is parsed and installed.
    ///
    /// # Errors
    ///
    /// * `MachineError::Configuration` if the configuration or one of its tapes is invalid.
    /// * `MachineError::Syntax` if the configured program is invalid.
    pub fn with_chooser(config: &MachineConfig, chooser: C) -> Result<Self, MachineError> {
        config.validate()?;

        let mut machine = Self {
            alphabet: config.alphabet.clone(),
            states: config.states.clone(),
            initial_state: config.initial_state.clone(),
            final_states: config.final_states.clone(),
            blank: config.blank.clone(),
            ignore: config.ignore.clone(),
            tapes: Vec::new(),
            initial_tapes: Vec::new(),
            program: Program::new(),
            state: config.initial_state.clone(),
            step_count: 0,
            chooser,
        };

        for tape in &config.tapes {
            machine.add_tape(tape)?;
        }

        if let Some(program) = &config.program {
            machine.load_program(program)?;
        }

        Ok(machine)
    }

    /// Adds a tape. Tapes can only be added while the program is still empty, since
    /// every rule carries exactly one symbol and one command per tape.
    pub fn add_tape(&mut self, config: &TapeConfig) -> Result<(), MachineError> {
        if !self.program.is_empty() {
            return Err(MachineError::Configuration(
                "Tapes cannot be added once a program is loaded".into(),
            ));
        }

        let tape = Tape::new(config, &self.blank)?;
        self.initial_tapes.push(tape.clone());
        self.tapes.push(tape);

        Ok(())
    }

    /// Parses `text` and appends its rules to the program.
    ///
    /// Parsing is all or nothing: if any line is invalid, no rule of `text` is added.
    ///
    /// # Returns
    ///
    /// The number of rules added.
    pub fn load_program(&mut self, text: &str) -> Result<usize, MachineError> {
        let vocabulary = Vocabulary {
            alphabet: &self.alphabet,
            states: &self.states,
            final_states: &self.final_states,
            ignore: &self.ignore,
            blanks: self.tapes.iter().map(Tape::blank).collect(),
        };

        let rules = parser::parse(text, &vocabulary)?;
        let count = rules.len();
        self.program.extend(rules);

        debug!(added = count, total = self.program.len(), "Loaded program");

        Ok(count)
    }

    /// Returns the rule to apply next, or `None` if no rule matches.
    ///
    /// When several rules match, the chooser picks one on every call.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::Runtime` if the chooser picks an index out of range.
    pub fn select_rule(&mut self) -> Result<Option<&TransitionRule>, MachineError> {
        let index = self.select_index()?;
        Ok(index.map(|i| &self.program.rules()[i]))
    }

    fn select_index(&mut self) -> Result<Option<usize>, MachineError> {
        let matches = {
            let symbols = self.symbols();
            self.program.matching(&self.state, &symbols)
        };

        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            candidates => {
                let pick = self.chooser.choose(candidates);
                debug!(state = %self.state, candidates, pick, "Nondeterministic choice");

                matches.get(pick).copied().map(Some).ok_or_else(|| {
                    MachineError::Runtime(format!(
                        "Chooser picked rule {pick} of {candidates} candidates"
                    ))
                })
            }
        }
    }

    /// Applies `rule` to the tapes and moves to its new state.
    ///
    /// All tapes are updated before the state changes.
    ///
    /// # Returns
    ///
    /// `true` if the new state is a final state.
    ///
    /// # Errors
    ///
    /// Returns `MachineError::Runtime`, leaving the machine untouched, if the rule does
    /// not fit this machine. Rules produced by [`Machine::load_program`] always fit.
    pub fn step(&mut self, rule: &TransitionRule) -> Result<bool, MachineError> {
        check_rule(rule, &self.tapes, &self.states, &self.alphabet, &self.ignore)?;
        execute(&mut self.tapes, rule);
        self.enter(rule.new_state());

        Ok(self.is_accepting())
    }

    fn apply(&mut self, index: usize) {
        let rule = &self.program.rules()[index];
        execute(&mut self.tapes, rule);
        self.state = rule.new_state().to_string();
        self.step_count += 1;

        trace!(step = self.step_count, rule = %rule, "Applied rule");
    }

    fn enter(&mut self, state: &str) {
        self.state = state.to_string();
        self.step_count += 1;

        trace!(step = self.step_count, state, "Entered state");
    }

    /// Executes a single iteration: select a rule and apply it.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule was applied.
    /// * `Step::Halt(_)` if the machine accepts or is stuck. The machine is unchanged.
    pub fn tick(&mut self) -> Result<Step, MachineError> {
        if self.is_accepting() {
            return Ok(Step::Halt(Halt::Accepted));
        }

        match self.select_index()? {
            Some(index) => {
                self.apply(index);
                Ok(Step::Continue)
            }
            None => Ok(Step::Halt(Halt::Stuck)),
        }
    }

    /// Runs the machine until it halts.
    ///
    /// There is no step limit: a program that never halts makes this call never return.
    pub fn run(&mut self) -> Result<Halt, MachineError> {
        loop {
            if let Step::Halt(halt) = self.tick()? {
                return Ok(self.halted(halt));
            }
        }
    }

    /// Runs the machine while `keep_going` approves each step.
    ///
    /// The check is evaluated once before every rule selection, so a refused step
    /// never draws from the chooser.
    ///
    /// # Returns
    ///
    /// * `Some(halt)` if the machine halted.
    /// * `None` if `keep_going` stopped the run first.
    pub fn run_while<F>(&mut self, mut keep_going: F) -> Result<Option<Halt>, MachineError>
    where
        F: FnMut(&Self) -> bool,
    {
        loop {
            if self.is_accepting() {
                return Ok(Some(self.halted(Halt::Accepted)));
            }

            if !keep_going(self) {
                debug!(steps = self.step_count, state = %self.state, "Run interrupted");
                return Ok(None);
            }

            let Some(index) = self.select_index()? else {
                return Ok(Some(self.halted(Halt::Stuck)));
            };

            self.apply(index);
        }
    }

    /// Runs the machine for at most `max_steps` rule applications.
    ///
    /// Returns `None` if the budget is spent before the machine halts.
    pub fn run_for(&mut self, max_steps: usize) -> Result<Option<Halt>, MachineError> {
        let start = self.step_count;
        self.run_while(|machine| machine.step_count - start < max_steps)
    }

    fn halted(&self, halt: Halt) -> Halt {
        info!(
            state = %self.state,
            steps = self.step_count,
            outcome = %halt,
            "Machine halted"
        );
        halt
    }

    /// Restores the initial tapes and state and clears the step count.
    /// The program is kept.
    pub fn reset(&mut self) {
        self.tapes = self.initial_tapes.clone();
        self.state = self.initial_state.clone();
        self.step_count = 0;
    }

    /// Returns the symbols currently under each head.
    pub fn symbols(&self) -> Vec<&str> {
        self.tapes.iter().map(Tape::read).collect()
    }

    /// Returns `true` if the machine is in a final state.
    pub fn is_accepting(&self) -> bool {
        self.final_states.contains(&self.state)
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn final_states(&self) -> &[State] {
        &self.final_states
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    pub fn blank(&self) -> &str {
        &self.blank
    }

    pub fn ignore(&self) -> &str {
        &self.ignore
    }

    pub fn tapes(&self) -> &[Tape] {
        &self.tapes
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the number of rules applied since construction or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }
}

/// Verifies that `rule` can be applied to a machine with these tapes and vocabulary.
fn check_rule(
    rule: &TransitionRule,
    tapes: &[Tape],
    states: &[State],
    alphabet: &[Symbol],
    ignore: &str,
) -> Result<(), MachineError> {
    let tape_count = tapes.len();
    if rule.commands().len() != tape_count || rule.symbols().len() != tape_count {
        return Err(MachineError::Runtime(format!(
            "Rule '{rule}' does not fit a machine with {tape_count} tape(s)"
        )));
    }

    if !states.iter().any(|s| s == rule.new_state()) {
        return Err(MachineError::Runtime(format!(
            "Rule '{rule}' leads to unknown state '{}'",
            rule.new_state()
        )));
    }

    let writable = |symbol: &str, tape: &Tape| {
        symbol == tape.blank() || alphabet.iter().any(|s| s == symbol)
    };

    for ((pattern, command), tape) in rule.symbols().iter().zip(rule.commands()).zip(tapes) {
        let known = match pattern {
            Pattern::Symbol(symbol) => writable(symbol, tape),
            Pattern::Any(token) => token == ignore,
        };
        if !known {
            return Err(MachineError::Runtime(format!(
                "Rule '{rule}' requires unknown symbol '{pattern}'"
            )));
        }

        if let Some(symbol) = command.write.as_deref().filter(|s| !writable(s, tape)) {
            return Err(MachineError::Runtime(format!(
                "Rule '{rule}' writes symbol '{symbol}', which may not be written"
            )));
        }
    }

    Ok(())
}

/// Runs the per-tape commands of `rule`: write first, then move.
fn execute(tapes: &mut [Tape], rule: &TransitionRule) {
    for (tape, command) in tapes.iter_mut().zip(rule.commands()) {
        if let Some(symbol) = &command.write {
            tape.write(symbol);
        }

        match command.direction {
            Direction::Right => tape.move_right(),
            Direction::Left => tape.move_left(),
            Direction::Stay => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Command;
    use std::collections::HashSet;

    /// Always picks the same candidate.
    struct Fixed(usize);

    impl RuleChooser for Fixed {
        fn choose(&mut self, _candidates: usize) -> usize {
            self.0
        }
    }

    /// Fails the test if a choice is ever needed.
    struct NoChoice;

    impl RuleChooser for NoChoice {
        fn choose(&mut self, candidates: usize) -> usize {
            panic!("Unexpected choice between {candidates} rules")
        }
    }

    fn config(alphabet: &[&str], tapes: Vec<TapeConfig>, program: &str) -> MachineConfig {
        MachineConfig {
            alphabet: alphabet.iter().map(|s| s.to_string()).collect(),
            tapes,
            program: Some(program.to_string()),
            ..MachineConfig::default()
        }
    }

    fn scan_machine() -> Machine<NoChoice> {
        let config = config(
            &["a", "b"],
            vec![TapeConfig::from_chars("aaa_")],
            "q0;a->Ra;q0\nq0;_->N;f",
        );
        Machine::with_chooser(&config, NoChoice).unwrap()
    }

    #[test]
    fn test_machine_creation() {
        let machine = scan_machine();

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.initial_state(), "q0");
        assert_eq!(machine.tapes().len(), 1);
        assert_eq!(machine.program().len(), 2);
        assert_eq!(machine.symbols(), vec!["a"]);
        assert_eq!(machine.step_count(), 0);
        assert!(!machine.is_accepting());
    }

    #[test]
    fn test_run_scans_to_blank_and_accepts() {
        let mut machine = scan_machine();

        let halt = machine.run().unwrap();

        assert_eq!(halt, Halt::Accepted);
        assert!(halt.is_accepted());
        assert_eq!(machine.state(), "f");
        assert_eq!(machine.tapes()[0].symbols(), vec!["a", "a", "a", "_"]);
        assert_eq!(machine.tapes()[0].head(), 3);
        assert_eq!(machine.step_count(), 4);
    }

    #[test]
    fn test_no_matching_rule_is_stuck_halt() {
        let config = config(&["a", "b"], vec![TapeConfig::from_chars("b")], "q0;a->R;q0");
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        assert_eq!(machine.tick().unwrap(), Step::Halt(Halt::Stuck));
        assert!(!machine.run().unwrap().is_accepted());
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_initial_final_state_accepts_immediately() {
        let config = MachineConfig {
            initial_state: "f".into(),
            tapes: vec![TapeConfig::from_chars("a")],
            ..MachineConfig::default()
        };
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        assert_eq!(machine.run().unwrap(), Halt::Accepted);
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_single_match_is_always_selected() {
        let mut machine = scan_machine();

        for _ in 0..10 {
            let rule = machine.select_rule().unwrap().unwrap();
            assert_eq!(rule.to_string(), "q0; a -> Ra; q0");
        }
    }

    #[test]
    fn test_ambiguous_rules_are_all_selected() {
        let config = config(
            &["a"],
            vec![TapeConfig::from_chars("a")],
            "q0;a->R;q0\nq0;a->L;q1",
        );
        let mut machine = Machine::new(&config).unwrap();

        let selected: HashSet<String> = (0..1000)
            .map(|_| machine.select_rule().unwrap().unwrap().new_state().to_string())
            .collect();

        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_injected_chooser_decides_ties() {
        let config = config(
            &["a"],
            vec![TapeConfig::from_chars("a")],
            "q0;a->R;q0\nq0;-->N;f",
        );

        let mut machine = Machine::with_chooser(&config, Fixed(1)).unwrap();
        assert_eq!(machine.run().unwrap(), Halt::Accepted);
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.tapes()[0].head(), 0);
    }

    #[test]
    fn test_out_of_range_choice_is_runtime_error() {
        let config = config(&["a"], vec![TapeConfig::from_chars("a")], "q0;a->R;q0\nq0;a->L;q0");
        let mut machine = Machine::with_chooser(&config, Fixed(5)).unwrap();

        assert!(matches!(machine.tick(), Err(MachineError::Runtime(_))));
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let config = config(
            &["a", "b"],
            vec![TapeConfig::from_chars("ab")],
            "q0;-->Ra;q0\nq0;-->Lb;q0\nq0;-->Wa;q1\nq1;-->R;q0",
        );

        let trace = |seed: u64| {
            let mut machine = Machine::with_chooser(&config, RandomChooser::seeded(seed)).unwrap();
            let mut trace = Vec::new();
            for _ in 0..200 {
                machine.tick().unwrap();
                trace.push((machine.state().to_string(), machine.tapes()[0].to_string()));
            }
            trace
        };

        assert_eq!(trace(11), trace(11));
    }

    #[test]
    fn test_wildcard_copies_between_tapes() {
        let config = config(
            &["a", "b"],
            vec![TapeConfig::from_chars("ab"), TapeConfig::default()],
            "q0; a, - -> Ra, Ra; q0\nq0; b, - -> Rb, Rb; q0\nq0; _, - -> N, N; f",
        );
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        assert_eq!(machine.run().unwrap(), Halt::Accepted);
        assert_eq!(machine.tapes()[0].symbols(), vec!["a", "b", "_"]);
        assert_eq!(machine.tapes()[1].symbols(), vec!["a", "b", "_"]);
        assert_eq!(machine.step_count(), 3);
    }

    #[test]
    fn test_finite_tape_run_gets_stuck_at_sentinel() {
        let config = config(
            &["a", "b"],
            vec![TapeConfig::from_chars("ab").right_finite(3)],
            "q0;a->Rb;q0\nq0;b->Ra;q0",
        );
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        assert_eq!(machine.run().unwrap(), Halt::Stuck);
        assert_eq!(machine.symbols(), vec!["eof"]);
        assert_eq!(machine.tapes()[0].symbols(), vec!["b", "a", "eof"]);
    }

    #[test]
    fn test_left_moves_grow_tape() {
        let config = config(&["a"], vec![TapeConfig::from_chars("a")], "q0;a->L;q1\nq1;_->La;q1");
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        assert_eq!(machine.run_for(3).unwrap(), None);
        assert_eq!(machine.tapes()[0].symbols(), vec!["_", "a", "a", "a"]);
        assert_eq!(machine.tapes()[0].head(), 0);
    }

    #[test]
    fn test_step_applies_rule_atomically() {
        let mut machine = scan_machine();
        let rule = TransitionRule::new(
            "q0",
            vec![Pattern::Symbol("a".into())],
            vec![Command::writing("b", Direction::Stay)],
            "f",
        );

        assert!(machine.step(&rule).unwrap());
        assert_eq!(machine.state(), "f");
        assert_eq!(machine.symbols(), vec!["b"]);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_step_rejects_foreign_rule() {
        let mut machine = scan_machine();
        let rule = TransitionRule::new(
            "q0",
            vec![Pattern::Symbol("a".into()), Pattern::Symbol("a".into())],
            vec![Command::moving(Direction::Right), Command::moving(Direction::Right)],
            "q1",
        );

        assert!(matches!(machine.step(&rule), Err(MachineError::Runtime(_))));
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.tapes()[0].head(), 0);
    }

    #[test]
    fn test_step_rejects_unwritable_symbols() {
        let mut machine = scan_machine();

        for symbol in ["eof", "zzz", "-"] {
            let rule = TransitionRule::new(
                "q0",
                vec![Pattern::Symbol("a".into())],
                vec![Command::writing(symbol, Direction::Stay)],
                "q1",
            );

            assert!(
                matches!(machine.step(&rule), Err(MachineError::Runtime(_))),
                "writing '{symbol}' should be rejected"
            );
        }

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tapes()[0].symbols(), vec!["a", "a", "a", "_"]);
    }

    #[test]
    fn test_step_rejects_unknown_patterns() {
        let mut machine = scan_machine();

        for pattern in [Pattern::Symbol("zzz".into()), Pattern::Any("*".into())] {
            let rule = TransitionRule::new(
                "q0",
                vec![pattern],
                vec![Command::moving(Direction::Right)],
                "q0",
            );

            assert!(matches!(machine.step(&rule), Err(MachineError::Runtime(_))));
        }

        assert_eq!(machine.tapes()[0].head(), 0);

        // Blank and the ignore token are always accepted.
        let rule = TransitionRule::new(
            "q0",
            vec![Pattern::Any("-".into())],
            vec![Command::writing("_", Direction::Right)],
            "q0",
        );
        assert!(!machine.step(&rule).unwrap());
        assert_eq!(machine.tapes()[0].symbols(), vec!["_", "a", "a", "_"]);
    }

    #[test]
    fn test_run_for_bounds_endless_program() {
        let config = config(&["a"], vec![TapeConfig::default()], "q0;-->R;q0");
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        assert_eq!(machine.run_for(100).unwrap(), None);
        assert_eq!(machine.step_count(), 100);
        assert_eq!(machine.tapes()[0].len(), 101);

        assert_eq!(machine.run_for(5).unwrap(), None);
        assert_eq!(machine.step_count(), 105);
    }

    #[test]
    fn test_run_for_reports_halt_within_budget() {
        let mut machine = scan_machine();

        assert_eq!(machine.run_for(10).unwrap(), Some(Halt::Accepted));
    }

    #[test]
    fn test_run_while_cooperative_cancellation() {
        let config = config(&["a"], vec![TapeConfig::default()], "q0;-->Ra;q0");
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        let outcome = machine
            .run_while(|machine| machine.tapes()[0].head() < 7)
            .unwrap();

        assert_eq!(outcome, None);
        assert_eq!(machine.tapes()[0].head(), 7);
    }

    #[test]
    fn test_chunked_run_matches_ticks() {
        let config = config(
            &["a", "b"],
            vec![TapeConfig::from_chars("ab")],
            "q0;-->Ra;q0\nq0;-->Lb;q0\nq0;-->Wa;q1\nq1;-->R;q0",
        );
        let snapshot = |machine: &Machine| {
            (machine.state().to_string(), machine.tapes()[0].to_string())
        };

        let mut ticked = Machine::with_chooser(&config, RandomChooser::seeded(11)).unwrap();
        let mut chunked = Machine::with_chooser(&config, RandomChooser::seeded(11)).unwrap();

        for step in 0..30 {
            ticked.tick().unwrap();
            assert_eq!(chunked.run_for(1).unwrap(), None);
            assert_eq!(snapshot(&chunked), snapshot(&ticked), "diverged at step {step}");
        }
    }

    #[test]
    fn test_refused_run_does_not_consume_choice() {
        let config = config(&["a"], vec![TapeConfig::from_chars("a")], "q0;a->R;q0\nq0;a->L;q0");
        let mut machine = Machine::with_chooser(&config, NoChoice).unwrap();

        assert_eq!(machine.run_for(0).unwrap(), None);
        assert_eq!(machine.run_while(|_| false).unwrap(), None);
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_reset() {
        let mut machine = scan_machine();
        machine.run().unwrap();

        machine.reset();

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tapes()[0].head(), 0);
        assert_eq!(machine.program().len(), 2);
        assert_eq!(machine.run().unwrap(), Halt::Accepted);
    }

    #[test]
    fn test_failed_load_installs_nothing() {
        let mut machine = scan_machine();

        let error = machine
            .load_program("q0;b->R;q0\nq0;b->R;q1\nq0;c->R;q0\nq1;a->L;q0")
            .unwrap_err();

        assert_eq!(error.line(), Some(3));
        assert_eq!(machine.program().len(), 2);
    }

    #[test]
    fn test_load_program_appends() {
        let mut machine = scan_machine();

        assert_eq!(machine.load_program("q0;b->L;q1\nq1;b->N;f").unwrap(), 2);
        assert_eq!(machine.program().len(), 4);
    }

    #[test]
    fn test_load_program_requires_tapes() {
        let mut machine = Machine::new(&MachineConfig::default()).unwrap();

        assert!(matches!(
            machine.load_program("q0;a->R;q0"),
            Err(MachineError::Configuration(_))
        ));
    }

    #[test]
    fn test_add_tape_after_program_is_rejected() {
        let mut machine = scan_machine();

        assert!(matches!(
            machine.add_tape(&TapeConfig::default()),
            Err(MachineError::Configuration(_))
        ));
        assert_eq!(machine.tapes().len(), 1);
    }

    #[test]
    fn test_invalid_configuration_fails_before_parsing() {
        let config = MachineConfig {
            final_states: vec!["done".into()],
            tapes: vec![TapeConfig::default()],
            program: Some("not a program".into()),
            ..MachineConfig::default()
        };

        assert!(matches!(
            Machine::new(&config),
            Err(MachineError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_program_in_config() {
        let config = config(&["a"], vec![TapeConfig::default()], "q0;a->R;q0\nf;a->R;q0");

        let error = Machine::new(&config).unwrap_err();
        assert_eq!(error.line(), Some(2));
    }

    #[test]
    fn test_boxed_chooser_machine() {
        let config = config(&["a"], vec![TapeConfig::from_chars("a")], "q0;a->R;q0\nq0;a->N;f");
        let chooser: Box<dyn RuleChooser> = Box::new(Fixed(1));
        let mut machine = Machine::with_chooser(&config, chooser).unwrap();

        assert_eq!(machine.run().unwrap(), Halt::Accepted);
    }
}
