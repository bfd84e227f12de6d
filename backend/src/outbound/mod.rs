//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **raster**: PNG rendering with `rusttype` glyphs and the `image` encoder
//! - **filesystem**: the output tree, accessed through `cap_std`
//! - **random**: seedable index source for variant selection
//!
//! Adapters are thin translators between domain types and infrastructure.
//! They contain no business logic.

pub mod filesystem;
pub mod random;
pub mod raster;

pub use filesystem::FsAvatarStore;
pub use random::SmallRngIndexSource;
pub use raster::{FontFace, RasterAvatarRenderer};
