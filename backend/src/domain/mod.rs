//! Domain primitives, services, and ports.
//!
//! Purpose: turn name pairs into initials, pick background variants from the
//! palette, and orchestrate rendering and storage through ports. Nothing in
//! this module knows about HTTP, fonts, or the filesystem.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - NameInput / Initials / normalize: name normalisation.
//! - Palette / ColorEntry / Variant: background colours.
//! - VariantSelector / StorageNamer: selection and output layout.
//! - AvatarService: the generation pipeline behind the driving ports.

pub mod avatar_service;
pub mod error;
pub mod generated_image;
pub mod generation_error;
pub mod generation_stats;
pub mod initials;
pub mod palette;
pub mod ports;
pub mod storage_namer;
pub mod trace_id;
pub mod variant_selector;

pub use self::avatar_service::AvatarService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::generated_image::{BulkEntryResult, GeneratedImage};
pub use self::generation_error::GenerationError;
pub use self::generation_stats::{GenerationStats, StatsSnapshot};
pub use self::initials::{Initials, InitialsValidationError, NameField, NameInput, normalize};
pub use self::palette::{ColorEntry, Palette, PaletteValidationError, STANDARD_COLORS, Variant};
pub use self::storage_namer::{AvatarLocation, StorageNamer, parse_variant_filename};
pub use self::trace_id::TraceId;
pub use self::variant_selector::VariantSelector;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use avatar_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such avatar"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
