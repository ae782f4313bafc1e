//! Footprint rectangles and inscribed-circle hitboxes
//!
//! Buried objects occupy a rectangular footprint in grid space, but every
//! collision and reveal test runs against the circle inscribed in that
//! rectangle: center at the footprint center, radius half the shorter side.
//! Partial-footprint cells near the corners are deliberately not "the
//! artifact".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cell_center;

/// Axis-aligned rectangle in grid-cell coordinates. May extend past the grid;
/// iteration clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl GridRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center in grid space.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x as f32 + self.w as f32 / 2.0, self.y as f32 + self.h as f32 / 2.0)
    }

    /// Axis-aligned overlap test (shared edges do not count).
    pub fn intersects(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Cell span clamped to a `grid_w` x `grid_h` grid, or `None` when the
    /// rectangle lies entirely outside. Ranges are half-open.
    pub fn clamped_span(
        &self,
        grid_w: usize,
        grid_h: usize,
    ) -> Option<(std::ops::Range<i32>, std::ops::Range<i32>)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(grid_w as i32);
        let y1 = self.bottom().min(grid_h as i32);
        (x0 < x1 && y0 < y1).then_some((x0..x1, y0..y1))
    }
}

/// The inscribed circle of a footprint, in grid space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleHitbox {
    pub center: Vec2,
    pub radius: f32,
}

impl CircleHitbox {
    pub fn inscribed(rect: &GridRect) -> Self {
        Self {
            center: rect.center(),
            radius: rect.w.min(rect.h) as f32 / 2.0,
        }
    }

    /// Whether a cell's center lies inside the circle.
    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        cell_center(x, y).distance_squared(self.center) <= self.radius * self.radius
    }

    /// Distance from a cell's center to the circle *boundary*, zero inside.
    /// This is what the detector buckets: proximity to the edge of the find,
    /// not to its center.
    pub fn boundary_distance(&self, x: i32, y: i32) -> f32 {
        (cell_center(x, y).distance(self.center) - self.radius).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_overlap() {
        let a = GridRect::new(0, 0, 4, 4);
        assert!(a.intersects(&GridRect::new(3, 3, 4, 4)));
        assert!(a.intersects(&GridRect::new(-2, -2, 4, 4)));
        // Edge-adjacent rectangles do not overlap.
        assert!(!a.intersects(&GridRect::new(4, 0, 4, 4)));
        assert!(!a.intersects(&GridRect::new(0, 4, 4, 4)));
    }

    #[test]
    fn clamped_span_clips_to_grid() {
        let r = GridRect::new(-2, 8, 5, 5);
        let (xs, ys) = r.clamped_span(10, 10).unwrap();
        assert_eq!(xs, 0..3);
        assert_eq!(ys, 8..10);

        assert!(GridRect::new(12, 0, 3, 3).clamped_span(10, 10).is_none());
        assert!(GridRect::new(-5, -5, 5, 5).clamped_span(10, 10).is_none());
    }

    #[test]
    fn inscribed_circle_of_wide_footprint() {
        // 10x6 footprint: radius comes from the short side.
        let hb = CircleHitbox::inscribed(&GridRect::new(0, 0, 10, 6));
        assert_eq!(hb.center, Vec2::new(5.0, 3.0));
        assert_eq!(hb.radius, 3.0);
        // Corner cell center is outside the circle despite being in the rect.
        assert!(!hb.contains_cell(0, 0));
        // Center cell is inside.
        assert!(hb.contains_cell(4, 2));
    }

    #[test]
    fn boundary_distance_is_zero_inside() {
        let hb = CircleHitbox::inscribed(&GridRect::new(0, 0, 10, 10));
        assert_eq!(hb.boundary_distance(4, 4), 0.0);
        // Cell centered 10.5 cells right of center: 5.5 past the radius-5 rim.
        let d = hb.boundary_distance(15, 4);
        assert!((d - 5.5).abs() < 1e-4);
    }
}
