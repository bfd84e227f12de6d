//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (avatars, images,
//!   health)
//! - **Schemas**: request and response DTOs plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`])
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::avatars::{
    BulkGenerateRequest, BulkGenerateResponse, BulkResultBody, ColorBody, ColorsResponse,
    GenerateResponse, GenerateVariantsRequest, GenerateVariantsResponse, ImageBase64Response,
    ImageDescriptor, NameBody, ServiceInfo, StatsBody, StatsResponse, StoredInitialsBody,
    UserInfo,
};
use crate::inbound::http::health::HealthReport;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Initials avatar API",
        description = "Generate, store, and serve initials-based profile images."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::avatars::index,
        crate::inbound::http::avatars::generate,
        crate::inbound::http::avatars::generate_variants,
        crate::inbound::http::avatars::bulk_generate,
        crate::inbound::http::avatars::get_image,
        crate::inbound::http::avatars::get_image_base64,
        crate::inbound::http::avatars::colors,
        crate::inbound::http::avatars::stats,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        NameBody,
        GenerateVariantsRequest,
        BulkGenerateRequest,
        UserInfo,
        ImageDescriptor,
        GenerateResponse,
        GenerateVariantsResponse,
        BulkResultBody,
        BulkGenerateResponse,
        ImageBase64Response,
        ColorBody,
        ColorsResponse,
        StoredInitialsBody,
        StatsBody,
        StatsResponse,
        ServiceInfo,
        HealthReport,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "avatars", description = "Avatar generation and palette"),
        (name = "images", description = "Retrieval of stored avatars"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
