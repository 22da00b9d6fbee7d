//! Random Source Adapters

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::RandomSource;

/// Production random source backed by `StdRng`.
///
/// Seeded from OS entropy by default; [`StdRandomSource::seeded`] gives a
/// reproducible stream for tests and replayable runs.
#[derive(Debug, Clone)]
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    /// Create a source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded if `seed` is given, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandomSource {
    fn random_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper.max(1))
    }
}

/// Fixed random source for deterministic testing.
///
/// Cycles through a fixed sequence of values, reduced modulo the requested
/// bound. Useful for forcing collisions.
///
/// # Example
///
/// ```rust
/// use scaffold_ids::adapters::FixedRandomSource;
/// use scaffold_ids::RandomSource;
///
/// let mut rng = FixedRandomSource::new(42);
/// assert_eq!(rng.random_index(100), 42);
/// assert_eq!(rng.random_index(100), 42); // Always same value
/// ```
#[derive(Debug, Clone)]
pub struct FixedRandomSource {
    values: Vec<usize>,
    cursor: usize,
}

impl FixedRandomSource {
    /// Create a source that always returns `value`.
    pub fn new(value: usize) -> Self {
        Self::sequence(vec![value])
    }

    /// Create a source that cycles through `values`.
    ///
    /// An empty sequence behaves like `new(0)`.
    pub fn sequence(values: Vec<usize>) -> Self {
        let values = if values.is_empty() { vec![0] } else { values };
        Self { values, cursor: 0 }
    }
}

impl RandomSource for FixedRandomSource {
    fn random_index(&mut self, upper: usize) -> usize {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        if upper == 0 {
            0
        } else {
            value % upper
        }
    }
}
