//! Glyph coverage masks: 8-bit alpha over the ink bounding box.

/// Row-major alpha mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Coverage {
    width: usize,
    height: usize,
    alpha: Vec<u8>,
}

impl Coverage {
    pub(super) const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            alpha: Vec::new(),
        }
    }

    pub(super) fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width * height],
        }
    }

    pub(super) const fn width(&self) -> usize {
        self.width
    }

    pub(super) const fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub(super) const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub(super) fn alpha_at(&self, x: usize, y: usize) -> u8 {
        if x >= self.width {
            return 0;
        }
        self.alpha.get(y * self.width + x).copied().unwrap_or(0)
    }

    /// Raise the alpha at `(x, y)` to at least `value`; out-of-range writes
    /// are ignored.
    pub(super) fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width {
            return;
        }
        if let Some(slot) = self.alpha.get_mut(y * self.width + x) {
            *slot = (*slot).max(value);
        }
    }

    /// Crop to the rows and columns that carry ink.
    pub(super) fn trimmed(&self) -> Self {
        let inked = |x: usize, y: usize| self.alpha_at(x, y) > 0;
        let rows: Vec<usize> = (0..self.height)
            .filter(|&y| (0..self.width).any(|x| inked(x, y)))
            .collect();
        let columns: Vec<usize> = (0..self.width)
            .filter(|&x| (0..self.height).any(|y| inked(x, y)))
            .collect();
        let (Some(&top), Some(&bottom), Some(&left), Some(&right)) =
            (rows.first(), rows.last(), columns.first(), columns.last())
        else {
            return Self::empty();
        };

        let mut cropped = Self::blank(right - left + 1, bottom - top + 1);
        for y in top..=bottom {
            for x in left..=right {
                cropped.set(x - left, y - top, self.alpha_at(x, y));
            }
        }
        cropped
    }

    /// Iterate `(x, y, alpha)` for every inked pixel.
    pub(super) fn inked(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.alpha
            .iter()
            .enumerate()
            .filter(|(_, alpha)| **alpha > 0)
            .map(|(index, alpha)| (index % self.width, index / self.width, *alpha))
    }
}
