//! Driven port supplying the randomness behind variant selection.
//!
//! Production wires a seeded or entropy-backed generator; tests script the
//! sequence with [`FixtureIndexSource`].

use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniformly distributed indices.
#[cfg_attr(test, mockall::automock)]
pub trait IndexSource: Send + Sync {
    /// Return an index in `0..bound`. `bound` is never zero.
    fn next_index(&self, bound: usize) -> usize;
}

/// Scripted index source replaying a fixed sequence in a loop.
///
/// Each value is reduced modulo the requested bound, so any script is valid
/// for any bound. An empty script always yields zero.
///
/// # Examples
/// ```
/// use avatar_backend::domain::ports::{FixtureIndexSource, IndexSource};
///
/// let source = FixtureIndexSource::new([4, 13]);
/// assert_eq!(source.next_index(12), 4);
/// assert_eq!(source.next_index(12), 1);
/// assert_eq!(source.next_index(12), 4);
/// ```
#[derive(Debug, Default)]
pub struct FixtureIndexSource {
    script: Vec<usize>,
    cursor: AtomicUsize,
}

impl FixtureIndexSource {
    /// Replay `script` in order, wrapping at the end.
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl IndexSource for FixtureIndexSource {
    fn next_index(&self, bound: usize) -> usize {
        if self.script.is_empty() || bound == 0 {
            return 0;
        }
        let at = self.cursor.fetch_add(1, Ordering::Relaxed) % self.script.len();
        self.script.get(at).copied().unwrap_or(0) % bound
    }
}
