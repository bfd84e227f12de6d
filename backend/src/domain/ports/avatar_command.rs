//! Driving port for avatar generation use-cases.
//!
//! All operations block while rendering and writing; async adapters run them
//! on a blocking pool.

use crate::domain::{BulkEntryResult, GeneratedImage, GenerationError, NameInput};

/// Generation use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
pub trait AvatarCommand: Send + Sync {
    /// Render and store one randomly chosen variant for `input`.
    fn generate_single(&self, input: &NameInput) -> Result<GeneratedImage, GenerationError>;

    /// Render and store `count` variants whose colours do not repeat until
    /// the palette is exhausted.
    fn generate_variants(
        &self,
        input: &NameInput,
        count: usize,
    ) -> Result<Vec<GeneratedImage>, GenerationError>;

    /// Run [`AvatarCommand::generate_single`] for every entry, isolating
    /// failures. Always returns one result per input, in input order.
    fn bulk_generate(&self, inputs: &[NameInput]) -> Vec<BulkEntryResult>;
}
