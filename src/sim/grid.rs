//! The dirt layer: a grid of remaining covering depth
//!
//! Cell values count down from `max_depth` to 0 (bare). Tools are the only
//! mutators, and they can only remove: depth is monotonically non-increasing
//! over a session.

use ndarray::Array2;

use super::geom::GridRect;

/// Result of digging one cell: depth before and after, both clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigDelta {
    pub before: u8,
    pub after: u8,
}

impl DigDelta {
    /// Did the strike actually move any dirt here?
    #[inline]
    pub fn changed(&self) -> bool {
        self.after != self.before
    }

    /// Did this dig drop the cell through `threshold`?
    #[inline]
    pub fn crossed(&self, threshold: u8) -> bool {
        self.before > threshold && self.after <= threshold
    }

    /// Exposed-or-newly-exposed rule for damage qualification: the cell was
    /// already at/below `threshold`, or this dig took it there.
    #[inline]
    pub fn exposed_at(&self, threshold: u8) -> bool {
        self.before <= threshold || self.crossed(threshold)
    }
}

/// Per-cell remaining dirt depth, `[0, max_depth]` everywhere.
#[derive(Debug, Clone)]
pub struct DirtGrid {
    cells: Array2<u8>,
    max_depth: u8,
}

impl DirtGrid {
    /// Every cell starts at the full covering depth.
    pub fn new(width: usize, height: usize, max_depth: u8) -> Self {
        Self {
            cells: Array2::from_elem((height, width), max_depth),
            max_depth,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Remaining depth at a cell, `None` outside the grid.
    pub fn depth(&self, x: i32, y: i32) -> Option<u8> {
        self.contains(x, y).then(|| self.cells[[y as usize, x as usize]])
    }

    /// Remove up to `amount` of dirt from a cell, flooring at bare ground.
    /// Out-of-grid coordinates are a no-op (`None`), never an error.
    pub fn dig(&mut self, x: i32, y: i32, amount: u8) -> Option<DigDelta> {
        if !self.contains(x, y) {
            return None;
        }
        let cell = &mut self.cells[[y as usize, x as usize]];
        let before = *cell;
        let after = before.saturating_sub(amount);
        *cell = after;
        Some(DigDelta { before, after })
    }

    /// Fraction of a footprint's bounding-box cells whose depth has reached
    /// `burial_depth` (+ tolerance), as a percentage. A footprint entirely
    /// outside the grid uncovers nothing: 0, not a division by zero.
    pub fn reveal_percentage(&self, footprint: &GridRect, burial_depth: u8, tolerance: u8) -> f32 {
        let Some((xs, ys)) = footprint.clamped_span(self.width(), self.height()) else {
            return 0.0;
        };
        let threshold = burial_depth.saturating_add(tolerance);
        let mut uncovered = 0u32;
        let mut total = 0u32;
        for y in ys {
            for x in xs.clone() {
                total += 1;
                if self.cells[[y as usize, x as usize]] <= threshold {
                    uncovered += 1;
                }
            }
        }
        if total == 0 {
            return 0.0;
        }
        uncovered as f32 / total as f32 * 100.0
    }
}
