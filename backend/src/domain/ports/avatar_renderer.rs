//! Driven port turning initials and a background colour into image bytes.

use super::define_port_error;
use crate::domain::{ColorEntry, Initials};

define_port_error! {
    /// Failures raised while rasterising or encoding an avatar.
    ///
    /// A missing TrueType font is not one of them: renderers fall back to
    /// a bitmap face instead of failing.
    pub enum AvatarRenderError {
        /// The canvas could not be allocated or drawn.
        Canvas { message: String } => "failed to draw avatar canvas: {message}",
        /// Encoding the finished canvas failed.
        Encode { message: String } => "failed to encode avatar image: {message}",
    }
}

/// Renders fixed-size avatar images.
///
/// Implementations must be deterministic: the same initials, colour, and
/// font resolution yield byte-identical output.
#[cfg_attr(test, mockall::automock)]
pub trait AvatarRenderer: Send + Sync {
    /// Render `initials` on a solid `background`, returning encoded PNG bytes.
    fn render(&self, initials: &Initials, background: &ColorEntry)
    -> Result<Vec<u8>, AvatarRenderError>;
}

/// Renderer returning a textual stand-in instead of pixels.
///
/// Output is `"{initials}|{hex}"`, which keeps service tests independent of
/// fonts and image codecs while staying deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAvatarRenderer;

impl AvatarRenderer for FixtureAvatarRenderer {
    fn render(
        &self,
        initials: &Initials,
        background: &ColorEntry,
    ) -> Result<Vec<u8>, AvatarRenderError> {
        Ok(format!("{initials}|{}", background.hex()).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Palette, normalize};

    #[test]
    fn fixture_output_encodes_inputs() {
        let initials = normalize("Kavitha", "Nair").expect("valid names");
        let palette = Palette::standard();
        let color = palette.color_at(4).expect("in range");
        let bytes = FixtureAvatarRenderer
            .render(&initials, color)
            .expect("fixture renders");
        assert_eq!(bytes, b"KN|#1ABC9C");
    }
}
