//! Backend library modules.
//!
//! Hexagonal layout: [`domain`] holds name normalisation, variant selection,
//! and the generation pipeline behind ports; [`outbound`] implements the
//! rendering, storage, and randomness ports; [`inbound`] exposes the driving
//! ports over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
