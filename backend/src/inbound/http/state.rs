//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{AvatarCommand, AvatarQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Generation use-cases.
    pub avatars: Arc<dyn AvatarCommand>,
    /// Read-only use-cases.
    pub avatar_query: Arc<dyn AvatarQuery>,
    /// Source of response timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl HttpState {
    /// Construct state from port implementations, using the system clock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use avatar_backend::domain::ports::{
    ///     FixtureAvatarRenderer, FixtureIndexSource, InMemoryAvatarStore,
    /// };
    /// use avatar_backend::domain::{
    ///     AvatarService, GenerationStats, Palette, StorageNamer, VariantSelector,
    /// };
    /// use avatar_backend::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(AvatarService::new(
    ///     Arc::new(FixtureAvatarRenderer),
    ///     Arc::new(InMemoryAvatarStore::new()),
    ///     VariantSelector::new(Palette::standard(), Arc::new(FixtureIndexSource::new([0]))),
    ///     StorageNamer::new("generated_images"),
    ///     Arc::new(GenerationStats::new()),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// assert_eq!(state.avatar_query.palette().len(), 12);
    /// ```
    pub fn new(avatars: Arc<dyn AvatarCommand>, avatar_query: Arc<dyn AvatarQuery>) -> Self {
        Self::with_clock(avatars, avatar_query, Arc::new(DefaultClock))
    }

    /// Construct state with an explicit clock.
    pub fn with_clock(
        avatars: Arc<dyn AvatarCommand>,
        avatar_query: Arc<dyn AvatarQuery>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            avatars,
            avatar_query,
            clock,
        }
    }
}
