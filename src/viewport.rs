//! Play-area fitting and pointer/grid coordinate mapping
//!
//! The dig area is a fixed-aspect portrait rectangle that must fit inside
//! whatever surface the host gives us, snapped down to whole "big pixel"
//! cells so the grid renders without sub-pixel shimmer, and centered by
//! letterboxing. The grid resolution is derived from the snapped area and
//! capped by a total cell budget.

use glam::Vec2;

use crate::config::ViewportTuning;

/// One computed viewport mapping. Cheap to copy; recomputed on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner of the play area inside the surface.
    pub origin_x: i32,
    pub origin_y: i32,
    /// Snapped play-area size in surface pixels.
    pub play_w: u32,
    pub play_h: u32,
    /// Grid resolution derived from the play area.
    pub grid_w: usize,
    pub grid_h: usize,
    /// Effective on-screen size of one grid cell. Equals `cell_size_px`
    /// exactly unless the cell budget forced the grid smaller.
    pub cell_w: f32,
    pub cell_h: f32,
}

impl Viewport {
    /// Fit a play area into `avail_w` x `avail_h` and derive the grid.
    pub fn compute(avail_w: u32, avail_h: u32, tuning: &ViewportTuning) -> Viewport {
        let cell = tuning.cell_size_px.max(1);
        let aw = avail_w as f32;
        let ah = avail_h as f32;

        // Width-limited or height-limited fit at the desired aspect.
        let (fit_w, fit_h) = if aw / ah <= tuning.aspect_ratio {
            (aw, aw / tuning.aspect_ratio)
        } else {
            (ah * tuning.aspect_ratio, ah)
        };

        // Snap down to whole cells, never below one cell.
        let snap = |v: f32| ((v / cell as f32).floor() as u32).max(1) * cell;
        let play_w = snap(fit_w);
        let play_h = snap(fit_h);

        let origin_x = (avail_w as i32 - play_w as i32).div_euclid(2);
        let origin_y = (avail_h as i32 - play_h as i32).div_euclid(2);

        let mut grid_w = ((play_w / cell) as usize).max(tuning.min_grid_dim);
        let mut grid_h = ((play_h / cell) as usize).max(tuning.min_grid_dim);
        let total = grid_w * grid_h;
        if total > tuning.max_grid_cells {
            let scale = (tuning.max_grid_cells as f32 / total as f32).sqrt();
            grid_w = ((grid_w as f32 * scale).floor() as usize).max(tuning.min_grid_dim);
            grid_h = ((grid_h as f32 * scale).floor() as usize).max(tuning.min_grid_dim);
        }

        Viewport {
            origin_x,
            origin_y,
            play_w,
            play_h,
            grid_w,
            grid_h,
            cell_w: play_w as f32 / grid_w as f32,
            cell_h: play_h as f32 / grid_h as f32,
        }
    }

    /// Convert a surface-space point to grid coordinates. The result may lie
    /// outside the grid; cell accessors clamp.
    pub fn to_grid(&self, screen: Vec2) -> (i32, i32) {
        (
            ((screen.x - self.origin_x as f32) / self.cell_w).floor() as i32,
            ((screen.y - self.origin_y as f32) / self.cell_h).floor() as i32,
        )
    }

    /// Surface-space center of a grid cell.
    pub fn to_screen(&self, gx: i32, gy: i32) -> Vec2 {
        Vec2::new(
            self.origin_x as f32 + (gx as f32 + 0.5) * self.cell_w,
            self.origin_y as f32 + (gy as f32 + 0.5) * self.cell_h,
        )
    }

    /// Surface-space rectangle of a grid cell (x, y, w, h).
    pub fn cell_rect(&self, gx: i32, gy: i32) -> (i32, i32, u32, u32) {
        let x0 = self.origin_x as f32 + gx as f32 * self.cell_w;
        let y0 = self.origin_y as f32 + gy as f32 * self.cell_h;
        let x1 = self.origin_x as f32 + (gx + 1) as f32 * self.cell_w;
        let y1 = self.origin_y as f32 + (gy + 1) as f32 * self.cell_h;
        (
            x0.floor() as i32,
            y0.floor() as i32,
            (x1.floor() - x0.floor()).max(1.0) as u32,
            (y1.floor() - y0.floor()).max(1.0) as u32,
        )
    }

    /// Whether a surface-space point lands inside the play area.
    pub fn contains_screen(&self, p: Vec2) -> bool {
        p.x >= self.origin_x as f32
            && p.y >= self.origin_y as f32
            && p.x < self.origin_x as f32 + self.play_w as f32
            && p.y < self.origin_y as f32 + self.play_h as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tuning() -> ViewportTuning {
        ViewportTuning::default()
    }

    #[test]
    fn phone_portrait_surface() {
        // 640x1136 with 16px cells: height-limited, width snaps 639 -> 624.
        let vp = Viewport::compute(640, 1136, &tuning());
        assert_eq!(vp.play_w, 624);
        assert_eq!(vp.play_h, 1136);
        assert_eq!(vp.grid_w, 39);
        assert_eq!(vp.grid_h, 71);
        assert_eq!(vp.origin_x, 8);
        assert_eq!(vp.origin_y, 0);
        assert_eq!(vp.cell_w, 16.0);
        assert_eq!(vp.cell_h, 16.0);
    }

    #[test]
    fn landscape_surface_is_width_letterboxed() {
        let vp = Viewport::compute(1920, 1080, &tuning());
        // Height-limited portrait area in a landscape surface.
        assert_eq!(vp.play_h, 1072);
        assert_eq!(vp.play_w, 592);
        assert!(vp.origin_x > 0);
        assert_eq!(vp.grid_w, 37);
        assert_eq!(vp.grid_h, 67);
    }

    #[test]
    fn tiny_surface_floors_at_one_cell_and_min_grid() {
        let vp = Viewport::compute(20, 20, &tuning());
        assert_eq!(vp.play_w, 16);
        assert_eq!(vp.play_h, 16);
        // Grid floors at 10 per axis even though the area is one cell.
        assert_eq!(vp.grid_w, 10);
        assert_eq!(vp.grid_h, 10);
        assert!(vp.cell_w < 16.0);
    }

    #[test]
    fn cell_budget_scales_grid_down() {
        let mut t = tuning();
        t.cell_size_px = 1;
        let vp = Viewport::compute(1000, 1920, &t);
        assert!(vp.grid_w * vp.grid_h <= t.max_grid_cells);
        assert!(vp.grid_w >= t.min_grid_dim && vp.grid_h >= t.min_grid_dim);
        // Budget binds, so cells render larger than cell_size_px.
        assert!(vp.cell_w > 1.0);
    }

    #[test]
    fn negligible_resize_keeps_resolution() {
        let a = Viewport::compute(640, 1136, &tuning());
        let b = Viewport::compute(641, 1136, &tuning());
        assert_eq!((a.grid_w, a.grid_h), (b.grid_w, b.grid_h));

        let c = Viewport::compute(800, 1420, &tuning());
        assert_ne!((a.grid_w, a.grid_h), (c.grid_w, c.grid_h));
    }

    #[test]
    fn pointer_round_trip() {
        let vp = Viewport::compute(640, 1136, &tuning());
        let center = vp.to_screen(5, 7);
        assert_eq!(vp.to_grid(center), (5, 7));
        // Just left of the play area maps to a negative column.
        let (gx, _) = vp.to_grid(Vec2::new(vp.origin_x as f32 - 1.0, 100.0));
        assert!(gx < 0);
    }

    proptest! {
        #[test]
        fn snap_and_containment(w in 16u32..4000, h in 16u32..4000) {
            let t = tuning();
            let vp = Viewport::compute(w, h, &t);
            prop_assert_eq!(vp.play_w % t.cell_size_px, 0);
            prop_assert_eq!(vp.play_h % t.cell_size_px, 0);
            prop_assert!(vp.origin_x >= 0);
            prop_assert!(vp.origin_y >= 0);
            prop_assert!(vp.origin_x as u32 + vp.play_w <= w);
            prop_assert!(vp.origin_y as u32 + vp.play_h <= h);
            // Centered within integer rounding.
            let slack_x = w as i32 - vp.play_w as i32 - 2 * vp.origin_x;
            let slack_y = h as i32 - vp.play_h as i32 - 2 * vp.origin_y;
            prop_assert!((0..=1).contains(&slack_x));
            prop_assert!((0..=1).contains(&slack_y));
            prop_assert!(vp.grid_w * vp.grid_h <= t.max_grid_cells.max(t.min_grid_dim * t.min_grid_dim));
        }

        #[test]
        fn aspect_is_preserved_before_snapping(w in 100u32..4000, h in 100u32..4000) {
            let t = tuning();
            let vp = Viewport::compute(w, h, &t);
            // Within one cell of the ideal aspect in each dimension.
            let ideal_h = vp.play_w as f32 / t.aspect_ratio;
            let ideal_w = vp.play_h as f32 * t.aspect_ratio;
            let cell = t.cell_size_px as f32;
            prop_assert!(
                (vp.play_h as f32 - ideal_h).abs() <= cell / t.aspect_ratio + cell
                    || (vp.play_w as f32 - ideal_w).abs() <= cell / t.aspect_ratio + cell
            );
        }
    }
}
