//! Background colour palette and the variants drawn from it.

use std::sync::Arc;

use serde::{Serialize, Serializer};

/// The twelve standard background colours, in variant order.
pub const STANDARD_COLORS: [(&str, &str); 12] = [
    ("#FF9933", "Saffron"),
    ("#FFD700", "Gold"),
    ("#A569BD", "Purple"),
    ("#1ABC9C", "Turquoise"),
    ("#2C3E50", "Dark Blue"),
    ("#E74C3C", "Red"),
    ("#F39C12", "Orange"),
    ("#27AE60", "Green"),
    ("#8E44AD", "Deep Purple"),
    ("#D35400", "Dark Orange"),
    ("#2980B9", "Blue"),
    ("#C0392B", "Dark Red"),
];

/// Palette construction failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteValidationError {
    /// Hex colour was not `#` followed by six hex digits.
    #[error("colour {0:?} must be '#' followed by six hex digits")]
    MalformedHex(String),
    /// Label was blank.
    #[error("colour {0} must have a label")]
    EmptyLabel(String),
    /// A palette needs at least one colour and at most 255.
    #[error("palette must hold between 1 and 255 colours, got {0}")]
    BadSize(usize),
}

/// A named background colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    hex: String,
    label: String,
    rgb: [u8; 3],
}

impl ColorEntry {
    /// Validate and build a colour from `#RRGGBB` and a label.
    ///
    /// The hex string is stored uppercased.
    ///
    /// # Errors
    /// Rejects malformed hex and blank labels.
    pub fn try_new(hex: &str, label: &str) -> Result<Self, PaletteValidationError> {
        let rgb = parse_hex(hex).ok_or_else(|| PaletteValidationError::MalformedHex(hex.to_owned()))?;
        if label.trim().is_empty() {
            return Err(PaletteValidationError::EmptyLabel(hex.to_owned()));
        }
        Ok(Self {
            hex: hex.to_ascii_uppercase(),
            label: label.trim().to_owned(),
            rgb,
        })
    }

    /// `#RRGGBB` form.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Human-readable name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Red, green, blue channels.
    #[must_use]
    pub const fn rgb(&self) -> [u8; 3] {
        self.rgb
    }
}

impl Serialize for ColorEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ColorEntry", 2)?;
        state.serialize_field("hex", &self.hex)?;
        state.serialize_field("label", &self.label)?;
        state.end()
    }
}

fn parse_hex(raw: &str) -> Option<[u8; 3]> {
    let digits = raw.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(digits.get(at..at + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Immutable ordered palette; variant `n` maps to entry `n - 1`.
///
/// Cloning is cheap: entries are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Arc<[ColorEntry]>,
}

impl Palette {
    /// The standard twelve-colour palette.
    #[must_use]
    pub fn standard() -> Self {
        let entries: Vec<ColorEntry> = STANDARD_COLORS
            .iter()
            .map(|(hex, label)| ColorEntry {
                hex: (*hex).to_owned(),
                label: (*label).to_owned(),
                rgb: parse_hex(hex).unwrap_or([0, 0, 0]),
            })
            .collect();
        Self {
            entries: entries.into(),
        }
    }

    /// Build a custom palette.
    ///
    /// # Errors
    /// Returns [`PaletteValidationError::BadSize`] for empty or oversized lists.
    pub fn try_new(entries: Vec<ColorEntry>) -> Result<Self, PaletteValidationError> {
        if entries.is_empty() || entries.len() > usize::from(u8::MAX) {
            return Err(PaletteValidationError::BadSize(entries.len()));
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Number of colours, which is also the highest variant index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; palettes are validated non-empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All colours in variant order.
    #[must_use]
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// Colour for a 1-based variant index.
    #[must_use]
    pub fn color_at(&self, index: u8) -> Option<&ColorEntry> {
        usize::from(index)
            .checked_sub(1)
            .and_then(|slot| self.entries.get(slot))
    }

    pub(crate) fn max_index(&self) -> u8 {
        u8::try_from(self.entries.len()).unwrap_or(u8::MAX)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// A palette position paired with its colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    index: u8,
    color: ColorEntry,
}

impl Variant {
    pub(crate) const fn new(index: u8, color: ColorEntry) -> Self {
        Self { index, color }
    }

    /// 1-based palette position.
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Background colour for this variant.
    #[must_use]
    pub const fn color(&self) -> &ColorEntry {
        &self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn standard_palette_has_twelve_distinct_colours() {
        let palette = Palette::standard();
        assert_eq!(palette.len(), 12);
        let mut hexes: Vec<&str> = palette.entries().iter().map(ColorEntry::hex).collect();
        hexes.sort_unstable();
        hexes.dedup();
        assert_eq!(hexes.len(), 12);
    }

    #[rstest]
    #[case(1, "#FF9933", "Saffron", [0xFF, 0x99, 0x33])]
    #[case(5, "#2C3E50", "Dark Blue", [0x2C, 0x3E, 0x50])]
    #[case(12, "#C0392B", "Dark Red", [0xC0, 0x39, 0x2B])]
    fn standard_positions_are_fixed(
        #[case] index: u8,
        #[case] hex: &str,
        #[case] label: &str,
        #[case] rgb: [u8; 3],
    ) {
        let palette = Palette::standard();
        let color = palette.color_at(index).expect("in range");
        assert_eq!(color.hex(), hex);
        assert_eq!(color.label(), label);
        assert_eq!(color.rgb(), rgb);
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn out_of_range_positions_are_absent(#[case] index: u8) {
        assert!(Palette::standard().color_at(index).is_none());
    }

    #[rstest]
    #[case("FF9933")]
    #[case("#FF993")]
    #[case("#GG9933")]
    #[case("#FF99330")]
    fn malformed_hex_is_rejected(#[case] hex: &str) {
        assert_eq!(
            ColorEntry::try_new(hex, "x"),
            Err(PaletteValidationError::MalformedHex(hex.to_owned()))
        );
    }

    #[rstest]
    fn lowercase_hex_is_normalised() {
        let color = ColorEntry::try_new("#a569bd", "Purple").expect("valid");
        assert_eq!(color.hex(), "#A569BD");
    }

    #[rstest]
    fn empty_palette_is_rejected() {
        assert_eq!(
            Palette::try_new(Vec::new()),
            Err(PaletteValidationError::BadSize(0))
        );
    }

    #[rstest]
    fn colours_serialise_as_hex_and_label() {
        let color = ColorEntry::try_new("#27AE60", "Green").expect("valid");
        let value = serde_json::to_value(&color).expect("serialise");
        assert_eq!(value, serde_json::json!({ "hex": "#27AE60", "label": "Green" }));
    }
}
