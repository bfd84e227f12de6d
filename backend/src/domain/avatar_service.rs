//! Avatar generation service implementing the driving ports.
//!
//! Composes normalisation, variant selection, rendering, and storage, and
//! keeps the process-wide generation counters.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{
    AvatarCommand, AvatarQuery, AvatarRenderer, AvatarStore, AvatarStoreError, StoredInventory,
};
use crate::domain::{
    BulkEntryResult, GeneratedImage, GenerationError, GenerationStats, Initials, NameInput,
    Palette, StatsSnapshot, StorageNamer, Variant, VariantSelector, normalize,
};

/// Orchestrates the generation pipeline.
pub struct AvatarService<R: ?Sized, S: ?Sized> {
    renderer: Arc<R>,
    store: Arc<S>,
    selector: VariantSelector,
    namer: StorageNamer,
    stats: Arc<GenerationStats>,
}

impl<R: ?Sized, S: ?Sized> AvatarService<R, S> {
    /// Wire the service with its collaborators.
    pub fn new(
        renderer: Arc<R>,
        store: Arc<S>,
        selector: VariantSelector,
        namer: StorageNamer,
        stats: Arc<GenerationStats>,
    ) -> Self {
        Self {
            renderer,
            store,
            selector,
            namer,
            stats,
        }
    }
}

impl<R, S> AvatarService<R, S>
where
    R: AvatarRenderer + ?Sized,
    S: AvatarStore + ?Sized,
{
    fn produce(&self, initials: &Initials, variant: &Variant) -> Result<GeneratedImage, GenerationError> {
        let png = self.renderer.render(initials, variant.color())?;
        let location = self.namer.resolve_path(initials, variant.index());
        self.store.write(&location, &png)?;
        self.stats.record(initials);
        debug!(
            initials = %initials,
            variant = variant.index(),
            path = %location.filepath().display(),
            "avatar stored"
        );
        Ok(GeneratedImage {
            initials: initials.clone(),
            variant_index: variant.index(),
            filename: location.filename().to_owned(),
            filepath: location.filepath().to_path_buf(),
            bg_color: variant.color().hex().to_owned(),
        })
    }
}

impl<R, S> AvatarCommand for AvatarService<R, S>
where
    R: AvatarRenderer + ?Sized,
    S: AvatarStore + ?Sized,
{
    fn generate_single(&self, input: &NameInput) -> Result<GeneratedImage, GenerationError> {
        let initials = normalize(&input.first_name, &input.last_name)?;
        let variant = self.selector.select_variant(None)?;
        let image = self.produce(&initials, &variant)?;
        info!(initials = %initials, variant = image.variant_index, "generated avatar");
        Ok(image)
    }

    fn generate_variants(
        &self,
        input: &NameInput,
        count: usize,
    ) -> Result<Vec<GeneratedImage>, GenerationError> {
        let initials = normalize(&input.first_name, &input.last_name)?;
        if count < 1 {
            return Err(GenerationError::validation(
                "num_variants",
                "num_variants must be at least 1",
            ));
        }
        let images = self
            .selector
            .distinct_variants(count)
            .iter()
            .map(|variant| self.produce(&initials, variant))
            .collect::<Result<Vec<_>, _>>()?;
        info!(initials = %initials, count = images.len(), "generated avatar variants");
        Ok(images)
    }

    fn bulk_generate(&self, inputs: &[NameInput]) -> Vec<BulkEntryResult> {
        let results: Vec<BulkEntryResult> = inputs
            .iter()
            .map(|input| {
                let outcome = self.generate_single(input);
                if let Err(err) = &outcome {
                    warn!(error = %err, "bulk entry failed");
                }
                BulkEntryResult {
                    input: input.clone(),
                    outcome,
                }
            })
            .collect();
        let succeeded = results.iter().filter(|r| r.succeeded()).count();
        info!(
            total = results.len(),
            succeeded,
            failed = results.len() - succeeded,
            "bulk generation finished"
        );
        results
    }
}

impl<R, S> AvatarQuery for AvatarService<R, S>
where
    R: AvatarRenderer + ?Sized,
    S: AvatarStore + ?Sized,
{
    fn palette(&self) -> Palette {
        self.selector.palette().clone()
    }

    fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn inventory(&self) -> Result<StoredInventory, GenerationError> {
        Ok(self.store.inventory(self.namer.root())?)
    }

    fn load_image(&self, initials: &str, filename: &str) -> Result<Vec<u8>, GenerationError> {
        let code = Initials::parse(initials)?;
        let not_found = || GenerationError::NotFound {
            initials: initials.to_owned(),
            filename: filename.to_owned(),
        };
        let location = self.namer.locate(&code, filename).ok_or_else(not_found)?;
        match self.store.read(&location) {
            Ok(bytes) => Ok(bytes),
            Err(AvatarStoreError::Missing { .. }) => Err(not_found()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "avatar_service_tests.rs"]
mod tests;
