//! Dig scene rendering: dirt bands, reveals, pebbles, biome border
//!
//! The grid is painted at one texel per cell into an off-screen buffer, then
//! scaled up into the play area with nearest-neighbor sampling so the big
//! pixels stay crisp at any surface size. Depth maps to a small number of
//! discrete brightness bands, not a gradient.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::framebuffer::{Color, Framebuffer, PxRect};
use crate::session::Biome;
use crate::sim::{Artifact, DirtGrid, TrashItem};
use crate::viewport::Viewport;

/// Visible depth bands between bare ground and full cover.
pub const DEPTH_BANDS: u32 = 6;

/// Border frame thickness in surface pixels.
const BORDER_PX: u32 = 10;

/// Bare ground where all dirt has been cleared.
const BARE_COLOR: Color = [0x2e, 0x24, 0x1b, 0xff];

/// Revealed artifact cells.
const GOLD: Color = [0xff, 0xd7, 0x00, 0xff];

/// Revealed trash cells: deliberately drab.
const TRASH_GRAY: Color = [0x9e, 0x9e, 0x9e, 0xff];

/// Everything the renderer needs to know about the site's look.
#[derive(Debug, Clone)]
pub struct Theme {
    pub biome: Biome,
    pub base_color: [u8; 3],
    pub border_color: [u8; 3],
}

struct Pebble {
    // Canonical 0..100 coordinates, rescaled at draw time.
    x: f32,
    y: f32,
    size: f32,
    shade: Color,
}

/// Draws the scene. Holds only render-side state: the cell buffer and the
/// seeded decoration layout.
pub struct SceneRenderer {
    seed: u64,
    cell_buf: Vec<u8>,
    buf_w: usize,
    buf_h: usize,
    pebbles: Vec<Pebble>,
}

impl SceneRenderer {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(0x9e77));
        let count = 50 + rng.random_range(0..50);
        let shades: [Color; 5] = [
            [0x66, 0x66, 0x66, 0xff],
            [0x77, 0x77, 0x77, 0xff],
            [0x88, 0x88, 0x88, 0xff],
            [0x99, 0x99, 0x99, 0xff],
            [0xaa, 0xaa, 0xaa, 0xff],
        ];
        let pebbles = (0..count)
            .map(|_| Pebble {
                x: rng.random::<f32>() * 100.0,
                y: rng.random::<f32>() * 100.0,
                size: 0.15 + rng.random::<f32>() * 0.2,
                shade: shades[rng.random_range(0..shades.len())],
            })
            .collect();
        Self {
            seed,
            cell_buf: Vec::new(),
            buf_w: 0,
            buf_h: 0,
            pebbles,
        }
    }

    /// Render the whole scene into `frame`. Pure with respect to simulation
    /// state; only the renderer's own buffers change.
    pub fn render(
        &mut self,
        frame: &mut Framebuffer,
        grid: &DirtGrid,
        artifact: &Artifact,
        trash: &[TrashItem],
        theme: &Theme,
        vp: &Viewport,
    ) {
        self.paint_cells(grid, artifact, trash, theme);
        self.blit(frame, vp);
        self.draw_pebbles(frame, grid, vp);
        self.draw_border(frame, theme, vp);
    }

    /// One texel per cell: dirt band, bare ground, or a reveal color.
    fn paint_cells(&mut self, grid: &DirtGrid, artifact: &Artifact, trash: &[TrashItem], theme: &Theme) {
        let (w, h) = (grid.width(), grid.height());
        if self.buf_w != w || self.buf_h != h {
            self.buf_w = w;
            self.buf_h = h;
            self.cell_buf.resize(w * h * 4, 0);
        }

        let artifact_hb = artifact.hitbox();
        for y in 0..h {
            for x in 0..w {
                let depth = grid.depth(x as i32, y as i32).unwrap_or(0);
                let mut color = if depth > 0 {
                    dirt_color(depth, grid.max_depth(), theme.base_color)
                } else {
                    BARE_COLOR
                };
                if depth <= artifact.burial_depth && artifact_hb.contains_cell(x as i32, y as i32) {
                    color = GOLD;
                } else if trash
                    .iter()
                    .any(|t| depth <= t.burial_depth && t.hitbox().contains_cell(x as i32, y as i32))
                {
                    color = TRASH_GRAY;
                }
                let i = (y * w + x) * 4;
                self.cell_buf[i..i + 4].copy_from_slice(&color);
            }
        }
    }

    /// Nearest-neighbor upscale of the cell buffer into the play area.
    fn blit(&self, frame: &mut Framebuffer, vp: &Viewport) {
        if self.buf_w == 0 || self.buf_h == 0 {
            return;
        }
        for py in 0..vp.play_h {
            let sy = (py as u64 * self.buf_h as u64 / vp.play_h as u64) as usize;
            let fy = vp.origin_y + py as i32;
            for px in 0..vp.play_w {
                let sx = (px as u64 * self.buf_w as u64 / vp.play_w as u64) as usize;
                let i = (sy * self.buf_w + sx) * 4;
                frame.set_pixel(
                    vp.origin_x + px as i32,
                    fy,
                    [
                        self.cell_buf[i],
                        self.cell_buf[i + 1],
                        self.cell_buf[i + 2],
                        self.cell_buf[i + 3],
                    ],
                );
            }
        }
    }

    /// Decorative specks, drawn only where dirt still covers the ground.
    fn draw_pebbles(&self, frame: &mut Framebuffer, grid: &DirtGrid, vp: &Viewport) {
        for p in &self.pebbles {
            let gx = (p.x / 100.0 * grid.width() as f32) as i32;
            let gy = (p.y / 100.0 * grid.height() as f32) as i32;
            if grid.depth(gx, gy).unwrap_or(0) == 0 {
                continue;
            }
            let center = vp.to_screen(gx, gy);
            let radius = p.size * vp.cell_w.min(vp.cell_h);
            frame.fill_disc(center, radius.max(1.0), p.shade, 200);
        }
    }

    /// Border frame plus biome-specific decoration. The decoration layout is
    /// re-derived from the session seed every frame, so it is stable on
    /// screen without being stored.
    fn draw_border(&self, frame: &mut Framebuffer, theme: &Theme, vp: &Viewport) {
        let [r, g, b] = theme.border_color;
        let border: Color = [r, g, b, 0xff];
        let accent = darken(border, 0.25);
        let (x, y) = (vp.origin_x, vp.origin_y);
        let (w, h) = (vp.play_w, vp.play_h);

        frame.fill_rect(PxRect::new(x, y, w, BORDER_PX), border);
        frame.fill_rect(PxRect::new(x, y + h as i32 - BORDER_PX as i32, w, BORDER_PX), border);
        frame.fill_rect(PxRect::new(x, y, BORDER_PX, h), border);
        frame.fill_rect(PxRect::new(x + w as i32 - BORDER_PX as i32, y, BORDER_PX, h), border);

        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(0xb0d8));
        match theme.biome {
            Biome::Grass => {
                // Tufts along the top edge.
                for i in 0..20 {
                    let tx = x + (i * w / 20) as i32;
                    frame.fill_rect(PxRect::new(tx, y, 2, BORDER_PX), accent);
                }
            }
            Biome::Rock => {
                for _ in 0..15 {
                    let tx = x + rng.random_range(0..w.max(1)) as i32;
                    let ty = y + rng.random_range(0..BORDER_PX) as i32;
                    frame.fill_rect(PxRect::new(tx, ty, 3, 3), accent);
                }
            }
            Biome::Sand => {
                // Ripple lines across the top band.
                for i in 0..5u32 {
                    let ty = y + (i * BORDER_PX / 5) as i32;
                    frame.fill_rect(PxRect::new(x, ty, w, 1), accent);
                }
            }
            Biome::Swamp => {
                for _ in 0..10 {
                    let tx = x + rng.random_range(0..w.max(1)) as i32;
                    let ty = y + rng.random_range(0..BORDER_PX) as i32;
                    frame.fill_disc(glam::Vec2::new(tx as f32, ty as f32), 2.0, accent, 255);
                }
            }
        }
    }
}

/// Quantize a depth into one of the discrete brightness bands.
pub fn dirt_color(depth: u8, max_depth: u8, base: [u8; 3]) -> Color {
    let max = max_depth.max(1) as f32;
    let clamped = depth.min(max_depth) as f32;
    let step = (clamped / max * DEPTH_BANDS as f32).round();
    let factor = 1.0 - 0.5 * step / DEPTH_BANDS as f32;
    [
        (base[0] as f32 * factor).round() as u8,
        (base[1] as f32 * factor).round() as u8,
        (base[2] as f32 * factor).round() as u8,
        0xff,
    ]
}

fn darken(c: Color, amount: f32) -> Color {
    let f = 1.0 - amount;
    [
        (c[0] as f32 * f) as u8,
        (c[1] as f32 * f) as u8,
        (c[2] as f32 * f) as u8,
        c[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewportTuning;
    use crate::session::DirtMaterial;
    use crate::sim::GridRect;

    fn setup() -> (Framebuffer, DirtGrid, Artifact, Theme, Viewport) {
        let vp = Viewport::compute(320, 568, &ViewportTuning::default());
        let frame = Framebuffer::new(320, 568);
        let grid = DirtGrid::new(vp.grid_w, vp.grid_h, 60);
        let artifact = Artifact {
            footprint: GridRect::new(5, 10, 8, 8),
            burial_depth: 50,
        };
        let theme = Theme {
            biome: Biome::Grass,
            base_color: DirtMaterial::Soil.base_color(),
            border_color: [0x22, 0x8b, 0x22],
        };
        (frame, grid, artifact, theme, vp)
    }

    #[test]
    fn covered_cell_renders_deepest_band() {
        let (mut frame, grid, artifact, theme, vp) = setup();
        let mut r = SceneRenderer::new(1);
        r.render(&mut frame, &grid, &artifact, &[], &theme, &vp);

        // Every cell starts at full depth, so somewhere in the play area the
        // deepest band color must show (pebbles cover only scattered cells).
        let expect = dirt_color(60, 60, theme.base_color);
        let found = (0..vp.grid_w as i32).any(|gx| {
            (0..vp.grid_h as i32).any(|gy| {
                let p = vp.to_screen(gx, gy);
                frame.pixel(p.x as i32, p.y as i32) == Some(expect)
            })
        });
        assert!(found);
    }

    #[test]
    fn dug_artifact_cell_renders_gold() {
        let (mut frame, mut grid, artifact, theme, vp) = setup();
        // Expose the cell at the artifact center.
        let c = artifact.footprint.center();
        let (cx, cy) = (c.x as i32, c.y as i32);
        while grid.depth(cx, cy).unwrap() > 0 {
            grid.dig(cx, cy, 60);
        }
        let mut r = SceneRenderer::new(1);
        r.render(&mut frame, &grid, &artifact, &[], &theme, &vp);
        let p = vp.to_screen(cx, cy);
        assert_eq!(frame.pixel(p.x as i32, p.y as i32), Some(GOLD));
    }

    #[test]
    fn buried_artifact_cell_stays_hidden() {
        let (mut frame, grid, artifact, theme, vp) = setup();
        let mut r = SceneRenderer::new(1);
        r.render(&mut frame, &grid, &artifact, &[], &theme, &vp);
        let c = artifact.footprint.center();
        let p = vp.to_screen(c.x as i32, c.y as i32);
        assert_ne!(frame.pixel(p.x as i32, p.y as i32), Some(GOLD));
    }

    #[test]
    fn revealed_trash_renders_gray() {
        let (mut frame, mut grid, artifact, theme, vp) = setup();
        let trash = TrashItem {
            footprint: GridRect::new(1, 30, 4, 4),
            burial_depth: 45,
        };
        let c = trash.footprint.center();
        grid.dig(c.x as i32, c.y as i32, 60);
        let mut r = SceneRenderer::new(1);
        r.render(&mut frame, &grid, &artifact, &[trash], &theme, &vp);
        let p = vp.to_screen(c.x as i32, c.y as i32);
        assert_eq!(frame.pixel(p.x as i32, p.y as i32), Some(TRASH_GRAY));
    }

    #[test]
    fn border_and_decoration_are_drawn() {
        for biome in [Biome::Grass, Biome::Rock, Biome::Sand, Biome::Swamp] {
            let (mut frame, grid, artifact, mut theme, vp) = setup();
            theme.biome = biome;
            let mut r = SceneRenderer::new(7);
            r.render(&mut frame, &grid, &artifact, &[], &theme, &vp);

            let border: Color = [0x22, 0x8b, 0x22, 0xff];
            // The frame itself.
            assert_eq!(frame.pixel(vp.origin_x, vp.origin_y + 20), Some(border));
            // Some decoration pixel in the top band differs from the plain
            // border color.
            let decorated = (0..vp.play_w as i32).any(|dx| {
                (0..BORDER_PX as i32).any(|dy| {
                    let px = frame.pixel(vp.origin_x + dx, vp.origin_y + dy);
                    px.is_some() && px != Some(border)
                })
            });
            assert!(decorated, "no decoration drawn for {biome:?}");
        }
    }

    #[test]
    fn depth_bands_are_discrete() {
        let base = [0x8b, 0x73, 0x55];
        // Depths within one band share a color...
        assert_eq!(dirt_color(58, 60, base), dirt_color(60, 60, base));
        // ...and bands differ across the range.
        assert_ne!(dirt_color(0, 60, base), dirt_color(60, 60, base));
        let distinct: std::collections::HashSet<_> =
            (0..=60).map(|d| dirt_color(d, 60, base)).collect();
        assert_eq!(distinct.len(), DEPTH_BANDS as usize + 1);
    }
}
