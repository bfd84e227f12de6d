//! Variant selection over the injected palette.

use std::sync::Arc;

use super::ports::IndexSource;
use super::{GenerationError, Palette, Variant};

/// Picks palette variants, either by explicit index or at random.
#[derive(Clone)]
pub struct VariantSelector {
    palette: Palette,
    source: Arc<dyn IndexSource>,
}

impl VariantSelector {
    /// Select from `palette` using `source` for random draws.
    pub fn new(palette: Palette, source: Arc<dyn IndexSource>) -> Self {
        Self { palette, source }
    }

    /// The palette variants are drawn from.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Resolve a requested 1-based index, or draw one uniformly when `None`.
    ///
    /// # Errors
    /// Returns a validation error when the index lies outside the palette.
    pub fn select_variant(&self, requested: Option<u8>) -> Result<Variant, GenerationError> {
        let index = match requested {
            Some(index) => index,
            None => self.random_index(),
        };
        self.palette
            .color_at(index)
            .map(|color| Variant::new(index, color.clone()))
            .ok_or_else(|| {
                GenerationError::validation(
                    "variant",
                    format!(
                        "variant index must be between 1 and {}, got {index}",
                        self.palette.len()
                    ),
                )
            })
    }

    /// Plan `count` variants with no repeated colour until the palette is
    /// exhausted.
    ///
    /// Indices are drawn as shuffled passes over the whole palette: the first
    /// `palette.len()` picks are a permutation, and each further block of
    /// picks starts a fresh permutation.
    #[must_use]
    pub fn distinct_variants(&self, count: usize) -> Vec<Variant> {
        let mut planned = Vec::with_capacity(count);
        while planned.len() < count {
            for index in self.shuffled_pass() {
                if planned.len() == count {
                    break;
                }
                if let Some(color) = self.palette.color_at(index) {
                    planned.push(Variant::new(index, color.clone()));
                }
            }
        }
        planned
    }

    fn random_index(&self) -> u8 {
        let bound = usize::from(self.palette.max_index());
        let drawn = self.source.next_index(bound).min(bound.saturating_sub(1));
        u8::try_from(drawn + 1).unwrap_or(1)
    }

    // Fisher-Yates over 1..=len driven by the injected source.
    fn shuffled_pass(&self) -> Vec<u8> {
        let mut indices: Vec<u8> = (1..=self.palette.max_index()).collect();
        for upper in (1..indices.len()).rev() {
            let pick = self.source.next_index(upper + 1).min(upper);
            indices.swap(upper, pick);
        }
        indices
    }
}

impl std::fmt::Debug for VariantSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantSelector")
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}
