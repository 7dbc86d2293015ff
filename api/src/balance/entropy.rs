//! Random draws behind a trait so tests can pin exact sequences.

use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// A source of uniform draws in `[0, 1)`.
pub trait Entropy: Send {
    fn next_unit(&mut self) -> f64;

    /// A delta uniformly distributed over `[-span / 2, span / 2)`.
    fn next_delta(&mut self, span: f64) -> f64 {
        (self.next_unit() - 0.5) * span
    }

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}

/// The production entropy source.
#[derive(Debug, Clone)]
pub struct SmallRngEntropy(SmallRng);

impl SmallRngEntropy {
    pub fn from_entropy() -> Self {
        Self(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Seeds from `seed` when given, otherwise from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Entropy for SmallRngEntropy {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}
