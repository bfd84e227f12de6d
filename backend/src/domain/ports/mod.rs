//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`AvatarRenderer`, `AvatarStore`, `IndexSource`) are
//! implemented by outbound adapters. Driving ports (`AvatarCommand`,
//! `AvatarQuery`) are implemented by the domain service and consumed by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod avatar_command;
mod avatar_query;
mod avatar_renderer;
mod avatar_store;
mod index_source;

#[cfg(test)]
pub use avatar_command::MockAvatarCommand;
pub use avatar_command::AvatarCommand;
#[cfg(test)]
pub use avatar_query::MockAvatarQuery;
pub use avatar_query::AvatarQuery;
#[cfg(test)]
pub use avatar_renderer::MockAvatarRenderer;
pub use avatar_renderer::{AvatarRenderError, AvatarRenderer, FixtureAvatarRenderer};
#[cfg(test)]
pub use avatar_store::MockAvatarStore;
pub use avatar_store::{
    AvatarStore, AvatarStoreError, InMemoryAvatarStore, StoredInitials, StoredInventory,
};
#[cfg(test)]
pub use index_source::MockIndexSource;
pub use index_source::{FixtureIndexSource, IndexSource};
