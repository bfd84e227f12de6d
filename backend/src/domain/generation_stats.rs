//! Process-wide generation counters.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Initials;

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    per_initials: BTreeMap<Initials, u64>,
}

/// Counts successful generations since process start.
///
/// Shared by every request; increments are serialised behind a mutex so
/// concurrent generations never lose updates.
#[derive(Debug, Default)]
pub struct GenerationStats {
    counters: Mutex<Counters>,
}

impl GenerationStats {
    /// Start from zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one successful generation for `initials`.
    pub fn record(&self, initials: &Initials) {
        let mut counters = self.counters();
        counters.total += 1;
        *counters.per_initials.entry(initials.clone()).or_default() += 1;
    }

    /// Copy the current counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let counters = self.counters();
        StatsSnapshot {
            total_generated: counters.total,
            per_initials: counters
                .per_initials
                .iter()
                .map(|(initials, count)| (initials.to_string(), *count))
                .collect(),
        }
    }
}

/// Immutable view of [`GenerationStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Successful generations across all initials.
    pub total_generated: u64,
    /// Successful generations per initials code, sorted by code.
    pub per_initials: BTreeMap<String, u64>,
}

impl StatsSnapshot {
    /// Number of distinct initials generated so far.
    #[must_use]
    pub fn total_initials(&self) -> usize {
        self.per_initials.len()
    }

    /// Count for one initials code.
    #[must_use]
    pub fn count_for(&self, initials: &str) -> u64 {
        self.per_initials.get(initials).copied().unwrap_or(0)
    }
}
