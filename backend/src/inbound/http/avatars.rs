//! Avatar HTTP handlers.
//!
//! ```text
//! GET  /
//! POST /generate
//! POST /generate-variants
//! POST /bulk-generate
//! GET  /image/{initials}/{filename}
//! GET  /image-base64/{initials}/{filename}
//! GET  /colors
//! GET  /stats
//! ```
//!
//! Generation renders and writes files, so every core call runs on the
//! blocking pool with the request's trace identifier re-entered there.

use std::collections::BTreeMap;

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::StoredInventory;
use crate::domain::{
    BulkEntryResult, Error, GeneratedImage, GenerationError, NameInput, StatsSnapshot, TraceId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::health::SERVICE_NAME;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Variants produced when a request does not say.
pub const DEFAULT_NUM_VARIANTS: i64 = 3;
/// Largest variant count accepted over HTTP.
pub const MAX_NUM_VARIANTS: i64 = 12;

const PALETTE_DESCRIPTION: &str = "Standard background palette; variant N uses colour N";

async fn run_blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, GenerationError> + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    let outcome = web::block(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, work),
        None => work(),
    })
    .await?;
    outcome.map_err(Error::from)
}

/// A first and last name.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct NameBody {
    /// Given name.
    #[serde(default)]
    #[schema(example = "Arjun")]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    #[schema(example = "Sharma")]
    pub last_name: String,
}

impl From<NameBody> for NameInput {
    fn from(value: NameBody) -> Self {
        Self::new(value.first_name, value.last_name)
    }
}

impl From<NameInput> for NameBody {
    fn from(value: NameInput) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

/// Request payload for `POST /generate-variants`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct GenerateVariantsRequest {
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// How many variants to render, 1 to 12. Defaults to 3.
    #[schema(minimum = 1, maximum = 12, example = 3)]
    pub num_variants: Option<i64>,
}

/// Request payload for `POST /bulk-generate`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkGenerateRequest {
    /// Names to generate avatars for.
    pub users: Vec<NameBody>,
}

/// Names as echoed back with their initials.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    /// Trimmed given name.
    pub first_name: String,
    /// Trimmed family name.
    pub last_name: String,
    /// Derived initials.
    #[schema(example = "AS")]
    pub initials: String,
}

impl UserInfo {
    fn new(input: &NameInput, initials: &str) -> Self {
        Self {
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            initials: initials.to_owned(),
        }
    }
}

/// One stored avatar variant.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageDescriptor {
    /// Palette position, 1 to 12.
    #[schema(example = 4)]
    pub variant: u8,
    /// Bare file name.
    #[schema(example = "AS_variant4.png")]
    pub filename: String,
    /// Path beneath the output root.
    #[schema(example = "generated_images/AS/AS_variant4.png")]
    pub filepath: String,
    /// Background colour.
    #[schema(example = "#1ABC9C")]
    pub bg_color: String,
    /// Retrieval path for the PNG.
    #[schema(example = "/image/AS/AS_variant4.png")]
    pub url: String,
}

impl From<&GeneratedImage> for ImageDescriptor {
    fn from(value: &GeneratedImage) -> Self {
        Self {
            variant: value.variant_index,
            filename: value.filename.clone(),
            filepath: value.filepath.display().to_string(),
            bg_color: value.bg_color.clone(),
            url: value.url(),
        }
    }
}

/// Response payload for `POST /generate`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Names and derived initials.
    pub user_info: UserInfo,
    /// The stored variant.
    pub image: ImageDescriptor,
    /// Human-readable summary.
    pub message: String,
}

/// Response payload for `POST /generate-variants`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateVariantsResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Names and derived initials.
    pub user_info: UserInfo,
    /// Stored variants, in generation order.
    pub variants: Vec<ImageDescriptor>,
    /// Number of entries in `variants`.
    pub total_variants: usize,
    /// Human-readable summary.
    pub message: String,
}

/// Outcome of one bulk entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkResultBody {
    /// The entry as submitted.
    pub user: NameBody,
    /// Whether an avatar was produced.
    pub success: bool,
    /// Derived initials on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    /// The stored variant on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDescriptor>,
    /// Why the entry failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<BulkEntryResult> for BulkResultBody {
    fn from(value: BulkEntryResult) -> Self {
        let user = NameBody::from(value.input);
        match value.outcome {
            Ok(image) => Self {
                user,
                success: true,
                initials: Some(image.initials.to_string()),
                image: Some(ImageDescriptor::from(&image)),
                error: None,
            },
            Err(err) => Self {
                user,
                success: false,
                initials: None,
                image: None,
                error: Some(client_message(&err)),
            },
        }
    }
}

// Render failures are internal; the entry reports a generic message.
fn client_message(err: &GenerationError) -> String {
    match err {
        GenerationError::Render(_) => "Internal server error".to_owned(),
        other => other.to_string(),
    }
}

/// Response payload for `POST /bulk-generate`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkGenerateResponse {
    /// `true` once the batch ran, even if entries failed.
    pub success: bool,
    /// Entries submitted.
    pub total_users: usize,
    /// Entries that produced an avatar.
    pub successful_generations: usize,
    /// Entries that failed.
    pub failed_generations: usize,
    /// One result per entry, in request order.
    pub results: Vec<BulkResultBody>,
}

/// Response payload for `GET /image-base64/{initials}/{filename}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageBase64Response {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Requested initials.
    pub initials: String,
    /// Requested file name.
    pub filename: String,
    /// PNG as a `data:image/png;base64,` URI.
    pub image_base64: String,
}

/// A palette colour.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColorBody {
    /// `#RRGGBB`.
    #[schema(example = "#FF9933")]
    pub hex: String,
    /// Display name.
    #[schema(example = "Saffron")]
    pub label: String,
}

/// Response payload for `GET /colors`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColorsResponse {
    /// Always `true`.
    pub success: bool,
    /// Colours in variant order.
    pub colors: Vec<ColorBody>,
    /// Number of colours.
    pub total_colors: usize,
    /// What the palette is for.
    pub description: String,
}

/// Stored variant count for one initials directory.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoredInitialsBody {
    /// Directory name.
    pub initials: String,
    /// PNG files present.
    pub variants: usize,
}

/// Counters since start plus what is on disk.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsBody {
    /// Successful renders since the process started.
    pub total_generated: u64,
    /// Distinct initials rendered since the process started.
    pub session_initials: usize,
    /// Renders per initials since the process started.
    pub per_initials: BTreeMap<String, u64>,
    /// Initials directories on disk.
    pub total_initials: usize,
    /// PNG files on disk.
    pub total_variants: usize,
    /// Per-directory breakdown of what is on disk.
    pub initials_generated: Vec<StoredInitialsBody>,
}

impl StatsBody {
    fn new(snapshot: StatsSnapshot, inventory: StoredInventory) -> Self {
        Self {
            total_generated: snapshot.total_generated,
            session_initials: snapshot.total_initials(),
            total_initials: inventory.total_initials(),
            total_variants: inventory.total_variants(),
            per_initials: snapshot.per_initials,
            initials_generated: inventory
                .entries
                .into_iter()
                .map(|entry| StoredInitialsBody {
                    initials: entry.initials,
                    variants: entry.variants,
                })
                .collect(),
        }
    }
}

/// Response payload for `GET /stats`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// The statistics.
    pub stats: StatsBody,
    /// Server time the statistics were taken.
    #[schema(format = "date-time")]
    pub timestamp: String,
}

/// Response payload for `GET /`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceInfo {
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Always `running`.
    pub status: &'static str,
    /// Endpoint index.
    #[schema(value_type = Object)]
    pub endpoints: BTreeMap<&'static str, &'static str>,
    /// Usage hint.
    pub documentation: &'static str,
}

fn parse_num_variants(raw: Option<i64>) -> Result<usize, Error> {
    let requested = raw.unwrap_or(DEFAULT_NUM_VARIANTS);
    if !(1..=MAX_NUM_VARIANTS).contains(&requested) {
        return Err(Error::invalid_request(format!(
            "num_variants must be between 1 and {MAX_NUM_VARIANTS}"
        ))
        .with_details(json!({
            "field": "num_variants",
            "value": requested,
        })));
    }
    usize::try_from(requested).map_err(|_| Error::invalid_request("num_variants is out of range"))
}

/// Service information and endpoint index.
#[utoipa::path(
    get,
    path = "/",
    tags = ["avatars"],
    responses((status = 200, description = "Service information", body = ServiceInfo))
)]
#[get("/")]
pub async fn index() -> web::Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("health", "/health"),
        ("generate", "/generate"),
        ("generate_variants", "/generate-variants"),
        ("bulk_generate", "/bulk-generate"),
        ("colors", "/colors"),
        ("stats", "/stats"),
        ("image_serve", "/image/{initials}/{filename}"),
        ("image_base64", "/image-base64/{initials}/{filename}"),
    ]);
    web::Json(ServiceInfo {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        endpoints,
        documentation: r#"POST /generate with JSON {"first_name": "John", "last_name": "Doe"}"#,
    })
}

/// Generate one avatar in a randomly chosen palette colour.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use avatar_backend::inbound::http::avatars::{NameBody, GenerateResponse, generate};
/// use avatar_backend::inbound::http::{ApiResult, state::HttpState};
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<web::Json<GenerateResponse>> {
///     let payload = web::Json(NameBody {
///         first_name: "Arjun".to_owned(),
///         last_name: "Sharma".to_owned(),
///     });
///     generate(state, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/generate",
    request_body = NameBody,
    responses(
        (status = 200, description = "Avatar generated", body = GenerateResponse),
        (status = 400, description = "Invalid names", body = ErrorSchema),
        (status = 500, description = "Storage or rendering failed", body = ErrorSchema)
    ),
    tags = ["avatars"],
    operation_id = "generateAvatar"
)]
#[post("/generate")]
pub async fn generate(
    state: web::Data<HttpState>,
    payload: web::Json<NameBody>,
) -> ApiResult<web::Json<GenerateResponse>> {
    let input = NameInput::from(payload.into_inner());
    let command = state.avatars.clone();
    let request = input.clone();
    let image = run_blocking(move || command.generate_single(&request)).await?;

    let user_info = UserInfo::new(&input, image.initials.as_str());
    let message = format!(
        "Profile image generated successfully for {} {}",
        user_info.first_name, user_info.last_name
    );
    Ok(web::Json(GenerateResponse {
        success: true,
        user_info,
        image: ImageDescriptor::from(&image),
        message,
    }))
}

/// Generate several avatars whose colours do not repeat.
#[utoipa::path(
    post,
    path = "/generate-variants",
    request_body = GenerateVariantsRequest,
    responses(
        (status = 200, description = "Variants generated", body = GenerateVariantsResponse),
        (status = 400, description = "Invalid names or variant count", body = ErrorSchema),
        (status = 500, description = "Storage or rendering failed", body = ErrorSchema)
    ),
    tags = ["avatars"],
    operation_id = "generateAvatarVariants"
)]
#[post("/generate-variants")]
pub async fn generate_variants(
    state: web::Data<HttpState>,
    payload: web::Json<GenerateVariantsRequest>,
) -> ApiResult<web::Json<GenerateVariantsResponse>> {
    let GenerateVariantsRequest {
        first_name,
        last_name,
        num_variants,
    } = payload.into_inner();
    let count = parse_num_variants(num_variants)?;
    let input = NameInput::new(first_name, last_name);
    let command = state.avatars.clone();
    let request = input.clone();
    let images = run_blocking(move || command.generate_variants(&request, count)).await?;

    let initials = images
        .first()
        .map(|image| image.initials.to_string())
        .unwrap_or_default();
    let user_info = UserInfo::new(&input, &initials);
    let variants: Vec<ImageDescriptor> = images.iter().map(ImageDescriptor::from).collect();
    let message = format!(
        "Generated {} variants for {} {}",
        variants.len(),
        user_info.first_name,
        user_info.last_name
    );
    Ok(web::Json(GenerateVariantsResponse {
        success: true,
        user_info,
        total_variants: variants.len(),
        variants,
        message,
    }))
}

/// Generate one avatar per entry, reporting failures per entry.
#[utoipa::path(
    post,
    path = "/bulk-generate",
    request_body = BulkGenerateRequest,
    responses(
        (status = 200, description = "Batch processed", body = BulkGenerateResponse),
        (status = 400, description = "Missing or malformed users array", body = ErrorSchema)
    ),
    tags = ["avatars"],
    operation_id = "bulkGenerateAvatars"
)]
#[post("/bulk-generate")]
pub async fn bulk_generate(
    state: web::Data<HttpState>,
    payload: web::Json<BulkGenerateRequest>,
) -> ApiResult<web::Json<BulkGenerateResponse>> {
    let inputs: Vec<NameInput> = payload
        .into_inner()
        .users
        .into_iter()
        .map(NameInput::from)
        .collect();
    let command = state.avatars.clone();
    let outcomes = run_blocking(move || Ok(command.bulk_generate(&inputs))).await?;

    let results: Vec<BulkResultBody> = outcomes.into_iter().map(BulkResultBody::from).collect();
    let successful = results.iter().filter(|result| result.success).count();
    Ok(web::Json(BulkGenerateResponse {
        success: true,
        total_users: results.len(),
        successful_generations: successful,
        failed_generations: results.len() - successful,
        results,
    }))
}

/// Serve a stored PNG.
#[utoipa::path(
    get,
    path = "/image/{initials}/{filename}",
    params(
        ("initials" = String, Path, description = "Two-letter initials directory"),
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "PNG image", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Malformed initials", body = ErrorSchema),
        (status = 404, description = "Image not found", body = ErrorSchema)
    ),
    tags = ["images"],
    operation_id = "getImage"
)]
#[get("/image/{initials}/{filename}")]
pub async fn get_image(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (initials, filename) = path.into_inner();
    let query = state.avatar_query.clone();
    let bytes = run_blocking(move || query.load_image(&initials, &filename)).await?;
    Ok(HttpResponse::Ok().content_type(ContentType::png()).body(bytes))
}

/// Serve a stored PNG as a base64 data URI.
#[utoipa::path(
    get,
    path = "/image-base64/{initials}/{filename}",
    params(
        ("initials" = String, Path, description = "Two-letter initials directory"),
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "Encoded image", body = ImageBase64Response),
        (status = 400, description = "Malformed initials", body = ErrorSchema),
        (status = 404, description = "Image not found", body = ErrorSchema)
    ),
    tags = ["images"],
    operation_id = "getImageBase64"
)]
#[get("/image-base64/{initials}/{filename}")]
pub async fn get_image_base64(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ImageBase64Response>> {
    let (initials, filename) = path.into_inner();
    let query = state.avatar_query.clone();
    let (segment, name) = (initials.clone(), filename.clone());
    let bytes = run_blocking(move || query.load_image(&segment, &name)).await?;
    Ok(web::Json(ImageBase64Response {
        success: true,
        initials,
        filename,
        image_base64: format!("data:image/png;base64,{}", BASE64.encode(bytes)),
    }))
}

/// List the background palette.
#[utoipa::path(
    get,
    path = "/colors",
    responses((status = 200, description = "Palette colours", body = ColorsResponse)),
    tags = ["avatars"],
    operation_id = "listColors"
)]
#[get("/colors")]
pub async fn colors(state: web::Data<HttpState>) -> web::Json<ColorsResponse> {
    let palette = state.avatar_query.palette();
    let colors: Vec<ColorBody> = palette
        .entries()
        .iter()
        .map(|entry| ColorBody {
            hex: entry.hex().to_owned(),
            label: entry.label().to_owned(),
        })
        .collect();
    web::Json(ColorsResponse {
        success: true,
        total_colors: colors.len(),
        colors,
        description: PALETTE_DESCRIPTION.to_owned(),
    })
}

/// Generation counters and the stored inventory.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Statistics", body = StatsResponse),
        (status = 500, description = "Output tree unreadable", body = ErrorSchema)
    ),
    tags = ["avatars"],
    operation_id = "getStats"
)]
#[get("/stats")]
pub async fn stats(state: web::Data<HttpState>) -> ApiResult<web::Json<StatsResponse>> {
    let query = state.avatar_query.clone();
    let (snapshot, inventory) =
        run_blocking(move || Ok((query.stats(), query.inventory()?))).await?;
    Ok(web::Json(StatsResponse {
        success: true,
        stats: StatsBody::new(snapshot, inventory),
        timestamp: state.clock.utc().to_rfc3339(),
    }))
}

#[cfg(test)]
#[path = "avatars_tests.rs"]
mod tests;
