//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::ports::{FixtureAvatarRenderer, FixtureIndexSource, InMemoryAvatarStore};
use crate::domain::{AvatarService, GenerationStats, Palette, StorageNamer, VariantSelector};
use crate::inbound::http::state::HttpState;

/// Timestamp reported by [`FixedClock`], as rendered by `to_rfc3339`.
pub const FIXED_TIMESTAMP: &str = "2026-01-15T09:30:00+00:00";

/// Output root used by in-memory services.
pub const TEST_ROOT: &str = "generated_images";

/// Clock frozen at [`FIXED_TIMESTAMP`].
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at [`FIXED_TIMESTAMP`].
    pub fn new() -> Self {
        let frozen = DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
            .expect("fixed timestamp parses")
            .with_timezone(&Utc);
        Self(frozen)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Service type wired with fixture adapters.
pub type FixtureService = AvatarService<FixtureAvatarRenderer, InMemoryAvatarStore>;

/// Build a service over an in-memory store with a scripted index source.
pub fn in_memory_service(script: impl IntoIterator<Item = usize>) -> Arc<FixtureService> {
    Arc::new(AvatarService::new(
        Arc::new(FixtureAvatarRenderer),
        Arc::new(InMemoryAvatarStore::new()),
        VariantSelector::new(
            Palette::standard(),
            Arc::new(FixtureIndexSource::new(script)),
        ),
        StorageNamer::new(TEST_ROOT),
        Arc::new(GenerationStats::new()),
    ))
}

/// HTTP state over `service` with the frozen clock.
pub fn state_for(service: Arc<FixtureService>) -> HttpState {
    HttpState::with_clock(service.clone(), service, Arc::new(FixedClock::new()))
}

/// HTTP state over a fresh in-memory service with the frozen clock.
pub fn fixed_clock_state() -> HttpState {
    state_for(in_memory_service([0]))
}
