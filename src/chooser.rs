//! Tie-break between several rules matching the same snapshot.
//!
//! The chooser is the only source of nondeterminism of a machine. It is injected at
//! construction, so a seeded chooser reproduces the same run every time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one of several matching rules.
pub trait RuleChooser {
    /// Returns an index in `0..candidates`. Only called with `candidates >= 2`.
    fn choose(&mut self, candidates: usize) -> usize;
}

/// Chooses uniformly at random with the wrapped generator.
#[derive(Debug, Clone)]
pub struct RandomChooser<R = StdRng> {
    rng: R,
}

impl RandomChooser<StdRng> {
    /// A chooser seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// A reproducible chooser.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomChooser<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> RuleChooser for RandomChooser<R> {
    fn choose(&mut self, candidates: usize) -> usize {
        self.rng.gen_range(0..candidates)
    }
}

impl<C: RuleChooser + ?Sized> RuleChooser for Box<C> {
    fn choose(&mut self, candidates: usize) -> usize {
        (**self).choose(candidates)
    }
}
