//! Result descriptors returned by the generation pipeline.

use std::path::PathBuf;

use super::{GenerationError, Initials, NameInput};

/// A rendered and stored avatar variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Initials drawn on the image.
    pub initials: Initials,
    /// 1-based palette position that chose the background.
    pub variant_index: u8,
    /// Bare file name.
    pub filename: String,
    /// Full path beneath the output root.
    pub filepath: PathBuf,
    /// Background colour as `#RRGGBB`.
    pub bg_color: String,
}

impl GeneratedImage {
    /// Retrieval path served by the HTTP adapter.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/image/{}/{}", self.initials, self.filename)
    }
}

/// Outcome of one entry in a bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntryResult {
    /// The entry as submitted.
    pub input: NameInput,
    /// The generated image, or why this entry failed.
    pub outcome: Result<GeneratedImage, GenerationError>,
}

impl BulkEntryResult {
    /// Whether this entry produced an image.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}
