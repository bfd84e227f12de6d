//! Pseudo-random index source backed by `rand`'s small, fast generator.

use std::sync::{Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::ports::IndexSource;

/// Thread-safe uniform index source.
///
/// Seed it for reproducible runs (tests, the offline CLI with `--seed`);
/// otherwise it draws from OS entropy.
#[derive(Debug)]
pub struct SmallRngIndexSource {
    rng: Mutex<SmallRng>,
}

impl SmallRngIndexSource {
    /// Seed from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Deterministic source for a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl IndexSource for SmallRngIndexSource {
    fn next_index(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..bound)
    }
}
