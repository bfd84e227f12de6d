//! PNG avatar renderer drawing white initials on a solid background.
//!
//! Text is measured by its ink bounding box rather than font metrics, so the
//! initials sit optically centred regardless of face. Oversized text is
//! scaled down until it fits inside the margin. Blending is integer-only and
//! the PNG encoder writes no timestamps, so identical inputs produce
//! identical bytes.

mod bitmap_font;
mod coverage;
mod font;

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::domain::ports::{AvatarRenderError, AvatarRenderer};
use crate::domain::{ColorEntry, Initials};

use self::coverage::Coverage;
pub use self::font::{DEFAULT_FONT_CANDIDATES, FontFace};

/// Width and height of every avatar, in pixels.
pub const CANVAS_SIZE: u32 = 400;
/// Nominal pixel size initials are drawn at before any shrinking.
pub const FONT_SIZE: f32 = 180.0;
/// Minimum gap between ink and each canvas edge.
pub const MARGIN: u32 = 40;

const TEXT_COLOR: [u8; 3] = [255, 255, 255];
const MAX_FIT_ATTEMPTS: usize = 8;

fn blend(foreground: u8, background: u8, alpha: u8) -> u8 {
    let (fg, bg, a) = (
        u32::from(foreground),
        u32::from(background),
        u32::from(alpha),
    );
    u8::try_from((fg * a + bg * (255 - a) + 127) / 255).unwrap_or(u8::MAX)
}

/// Renders avatars with a font face resolved once at construction.
#[derive(Debug, Clone)]
pub struct RasterAvatarRenderer {
    face: FontFace,
}

impl RasterAvatarRenderer {
    /// Use `face` for every render.
    #[must_use]
    pub const fn new(face: FontFace) -> Self {
        Self { face }
    }

    /// The face chosen at construction.
    #[must_use]
    pub const fn face(&self) -> &FontFace {
        &self.face
    }

    fn fitted_coverage(&self, text: &str) -> Coverage {
        let available = usize::try_from(CANVAS_SIZE - 2 * MARGIN).unwrap_or(usize::MAX);
        let mut px = FONT_SIZE;
        let mut coverage = self.face.rasterize(text, px);
        for _ in 0..MAX_FIT_ATTEMPTS {
            let largest = coverage.width().max(coverage.height());
            if largest <= available {
                break;
            }
            #[expect(
                clippy::cast_precision_loss,
                reason = "mask dimensions are far below f32 precision limits"
            )]
            let ratio = available as f32 / largest as f32;
            px = (px * ratio).min(px - 1.0).max(1.0);
            debug!(text, px, "shrinking initials to fit canvas");
            coverage = self.face.rasterize(text, px);
        }
        coverage
    }
}

impl AvatarRenderer for RasterAvatarRenderer {
    fn render(
        &self,
        initials: &Initials,
        background: &ColorEntry,
    ) -> Result<Vec<u8>, AvatarRenderError> {
        let bg = background.rgb();
        let mut canvas = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgb(bg));

        let coverage = self.fitted_coverage(initials.as_str());
        let (Ok(ink_width), Ok(ink_height)) =
            (u32::try_from(coverage.width()), u32::try_from(coverage.height()))
        else {
            return Err(AvatarRenderError::canvas("glyph mask exceeds canvas"));
        };
        let left = CANVAS_SIZE.saturating_sub(ink_width) / 2;
        let top = CANVAS_SIZE.saturating_sub(ink_height) / 2;

        for (x, y, alpha) in coverage.inked() {
            let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                continue;
            };
            let Some(pixel) = canvas.get_pixel_mut_checked(left + x, top + y) else {
                continue;
            };
            for (channel, (fg, base)) in pixel.0.iter_mut().zip(TEXT_COLOR.iter().zip(bg)) {
                *channel = blend(*fg, base, alpha);
            }
        }

        let mut png = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|error| AvatarRenderError::encode(error.to_string()))?;
        Ok(png)
    }
}
