//! Font resolution for the raster renderer.
//!
//! Candidates are tried once, in order, when the renderer is built. The first
//! file that parses as a TrueType font wins; when none does, rendering falls
//! back to the built-in bitmap face and a warning is logged.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use rusttype::{Font, Scale, point};
use tracing::{debug, info, warn};

use super::bitmap_font;
use super::coverage::Coverage;

/// Bold sans-serif faces probed when no font is configured.
pub const DEFAULT_FONT_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
    "arial.ttf",
];

/// The face initials are drawn with.
#[derive(Clone)]
pub enum FontFace {
    /// A parsed TrueType or OpenType font.
    TrueType {
        /// Parsed font data.
        font: Arc<Font<'static>>,
        /// File the font was loaded from.
        source: PathBuf,
    },
    /// The built-in 5x7 bitmap face.
    Bitmap,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrueType { source, .. } => {
                f.debug_struct("TrueType").field("source", source).finish_non_exhaustive()
            }
            Self::Bitmap => f.write_str("Bitmap"),
        }
    }
}

fn read_font_file(path: &Path) -> std::io::Result<Vec<u8>> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "font path has no file name")
    })?;
    Dir::open_ambient_dir(parent, ambient_authority())?.read(file_name)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "coverage is clamped to 0..=1 before scaling to a byte"
)]
fn coverage_to_alpha(coverage: f32) -> u8 {
    (coverage.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn rasterize_truetype(font: &Font<'static>, text: &str, px: f32) -> Coverage {
    let scale = Scale::uniform(px);
    let ascent = font.v_metrics(scale).ascent;
    let positioned: Vec<_> = font
        .layout(text, scale, point(0.0, ascent))
        .filter_map(|glyph| glyph.pixel_bounding_box().map(|bounds| (glyph, bounds)))
        .collect();

    let min_x = positioned.iter().map(|(_, b)| b.min.x).min();
    let min_y = positioned.iter().map(|(_, b)| b.min.y).min();
    let max_x = positioned.iter().map(|(_, b)| b.max.x).max();
    let max_y = positioned.iter().map(|(_, b)| b.max.y).max();
    let (Some(min_x), Some(min_y), Some(max_x), Some(max_y)) = (min_x, min_y, max_x, max_y) else {
        return Coverage::empty();
    };
    let (Ok(width), Ok(height)) = (usize::try_from(max_x - min_x), usize::try_from(max_y - min_y))
    else {
        return Coverage::empty();
    };

    let mut coverage = Coverage::blank(width, height);
    for (glyph, bounds) in &positioned {
        let (Ok(offset_x), Ok(offset_y)) = (
            usize::try_from(bounds.min.x - min_x),
            usize::try_from(bounds.min.y - min_y),
        ) else {
            continue;
        };
        glyph.draw(|gx, gy, value| {
            let (Ok(gx), Ok(gy)) = (usize::try_from(gx), usize::try_from(gy)) else {
                return;
            };
            coverage.set(offset_x + gx, offset_y + gy, coverage_to_alpha(value));
        });
    }
    coverage.trimmed()
}

impl FontFace {
    /// Probe the configured font first, then the defaults.
    #[must_use]
    pub fn resolve(configured: Option<&Path>) -> Self {
        let candidates: Vec<PathBuf> = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from))
            .collect();
        Self::resolve_from(&candidates)
    }

    /// Return the first candidate that loads, or [`FontFace::Bitmap`].
    #[must_use]
    pub fn resolve_from(candidates: &[PathBuf]) -> Self {
        for candidate in candidates {
            match Self::load(candidate) {
                Ok(face) => {
                    info!(path = %candidate.display(), "loaded avatar font");
                    return face;
                }
                Err(reason) => {
                    debug!(path = %candidate.display(), %reason, "font candidate rejected");
                }
            }
        }
        warn!(
            tried = candidates.len(),
            "no TrueType font could be loaded; using built-in bitmap font"
        );
        Self::Bitmap
    }

    fn load(path: &Path) -> Result<Self, String> {
        let bytes = read_font_file(path).map_err(|error| error.to_string())?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| "not a TrueType font".to_owned())?;
        Ok(Self::TrueType {
            font: Arc::new(font),
            source: path.to_path_buf(),
        })
    }

    /// Short label for logs and diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::TrueType { source, .. } => format!("truetype:{}", source.display()),
            Self::Bitmap => "bitmap".to_owned(),
        }
    }

    /// Whether the bitmap fallback is in use.
    #[must_use]
    pub const fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap)
    }

    pub(super) fn rasterize(&self, text: &str, px: f32) -> Coverage {
        match self {
            Self::TrueType { font, .. } => rasterize_truetype(font, text, px),
            Self::Bitmap => bitmap_font::rasterize(text, px),
        }
    }
}
