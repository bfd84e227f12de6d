//! Built-in 5x7 bitmap face used when no TrueType font can be loaded.

use super::coverage::Coverage;

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
const GLYPH_GAP: usize = 1;

// Ratio between the requested pixel size and one bitmap cell, chosen so a
// 180px request draws letters about as tall as a bold sans cap height.
const PX_PER_CELL: f32 = 9.0;

// Rows top to bottom, low five bits left to right.
const LETTERS: [[u8; GLYPH_HEIGHT]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
];

// Hollow box for letters outside A-Z.
const UNKNOWN: [u8; GLYPH_HEIGHT] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

fn glyph_for(ch: char) -> &'static [u8; GLYPH_HEIGHT] {
    let upper = ch.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        let offset = usize::from(u8::try_from(upper).unwrap_or(b'A') - b'A');
        LETTERS.get(offset).unwrap_or(&UNKNOWN)
    } else {
        &UNKNOWN
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "pixel sizes are small positive values floored before conversion"
)]
fn cell_size(px: f32) -> usize {
    (px / PX_PER_CELL).floor().max(1.0) as usize
}

/// Rasterise `text` with every bitmap cell `px / 9` pixels square.
pub(super) fn rasterize(text: &str, px: f32) -> Coverage {
    let glyphs: Vec<_> = text.chars().map(glyph_for).collect();
    if glyphs.is_empty() {
        return Coverage::empty();
    }
    let cell = cell_size(px);
    let columns = glyphs.len() * (GLYPH_WIDTH + GLYPH_GAP) - GLYPH_GAP;
    let mut coverage = Coverage::blank(columns * cell, GLYPH_HEIGHT * cell);

    for (slot, rows) in glyphs.iter().enumerate() {
        let left = slot * (GLYPH_WIDTH + GLYPH_GAP);
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (0x10 >> column) == 0 {
                    continue;
                }
                for dy in 0..cell {
                    for dx in 0..cell {
                        coverage.set((left + column) * cell + dx, row * cell + dy, u8::MAX);
                    }
                }
            }
        }
    }
    coverage.trimmed()
}
