//! Builders wiring the production adapters into the avatar service.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use avatar_backend::domain::{
    AvatarService, GenerationStats, Palette, StorageNamer, VariantSelector,
};
use avatar_backend::inbound::http::state::HttpState;
use avatar_backend::outbound::{
    FontFace, FsAvatarStore, RasterAvatarRenderer, SmallRngIndexSource,
};

use super::ServerConfig;

/// Avatar service backed by the raster renderer and the filesystem store.
pub(crate) type ProductionAvatarService = AvatarService<RasterAvatarRenderer, FsAvatarStore>;

/// Resolve the font and assemble the generation pipeline.
pub(crate) fn build_avatar_service(config: &ServerConfig) -> Arc<ProductionAvatarService> {
    let renderer = RasterAvatarRenderer::new(FontFace::resolve(config.font_path.as_deref()));
    info!(
        font = %renderer.face().describe(),
        output_root = %config.output_root().display(),
        seeded = config.rng_seed.is_some(),
        "avatar pipeline configured"
    );
    let selector = VariantSelector::new(
        Palette::standard(),
        Arc::new(SmallRngIndexSource::from_optional_seed(config.rng_seed)),
    );
    Arc::new(AvatarService::new(
        Arc::new(renderer),
        Arc::new(FsAvatarStore::new()),
        selector,
        StorageNamer::new(config.output_root().to_path_buf()),
        Arc::new(GenerationStats::new()),
    ))
}

/// Build the shared handler state over one service instance.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let service = build_avatar_service(config);
    web::Data::new(HttpState::new(service.clone(), service))
}
