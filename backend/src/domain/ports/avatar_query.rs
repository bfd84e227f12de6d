//! Driving port for read-only avatar use-cases.

use super::StoredInventory;
use crate::domain::{GenerationError, Palette, StatsSnapshot};

/// Read paths exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
pub trait AvatarQuery: Send + Sync {
    /// The palette variants are drawn from.
    fn palette(&self) -> Palette;

    /// Counters since process start.
    fn stats(&self) -> StatsSnapshot;

    /// What is currently stored beneath the output root.
    fn inventory(&self) -> Result<StoredInventory, GenerationError>;

    /// Load a stored PNG by initials directory and file name.
    ///
    /// Both segments are validated against the storage layout before any
    /// filesystem access.
    fn load_image(&self, initials: &str, filename: &str) -> Result<Vec<u8>, GenerationError>;
}
