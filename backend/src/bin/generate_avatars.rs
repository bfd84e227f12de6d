//! Render avatars for one name straight to the output tree, without the HTTP
//! server.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use avatar_backend::domain::ports::AvatarCommand;
use avatar_backend::domain::{
    AvatarService, GenerationStats, NameInput, Palette, StorageNamer, VariantSelector,
};
use avatar_backend::outbound::{
    FontFace, FsAvatarStore, RasterAvatarRenderer, SmallRngIndexSource,
};
use avatar_backend::settings::DEFAULT_OUTPUT_ROOT;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `generate-avatars` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "generate-avatars",
    about = "Render initials avatars for one name into the output tree",
    version
)]
struct CliArgs {
    /// Given name.
    #[arg(long = "first-name", value_name = "name")]
    first_name: String,
    /// Family name.
    #[arg(long = "last-name", value_name = "name")]
    last_name: String,
    /// Number of distinct-colour variants to render.
    #[arg(long = "variants", value_name = "count", default_value_t = 1)]
    variants: usize,
    /// Root of the generated image tree.
    #[arg(long = "output-root", value_name = "dir", default_value = DEFAULT_OUTPUT_ROOT)]
    output_root: PathBuf,
    /// Seed for reproducible colour selection.
    #[arg(long = "seed", value_name = "u64")]
    seed: Option<u64>,
    /// Font probed before the built-in candidates.
    #[arg(long = "font", value_name = "path")]
    font: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let service = AvatarService::new(
        Arc::new(RasterAvatarRenderer::new(FontFace::resolve(args.font.as_deref()))),
        Arc::new(FsAvatarStore::new()),
        VariantSelector::new(
            Palette::standard(),
            Arc::new(SmallRngIndexSource::from_optional_seed(args.seed)),
        ),
        StorageNamer::new(args.output_root),
        Arc::new(GenerationStats::new()),
    );

    let input = NameInput::new(args.first_name, args.last_name);
    let images = service
        .generate_variants(&input, args.variants)
        .map_err(|error| io::Error::other(format!("generation failed: {error}")))?;

    for image in images {
        println!(
            "variant={} bg_color={} filepath={}",
            image.variant_index,
            image.bg_color,
            image.filepath.display()
        );
    }

    Ok(())
}
