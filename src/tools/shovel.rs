//! The shovel: fast, loud, and dangerous to the find
//!
//! Each strike clears a disc of dirt in one hit, gated by a cooldown that
//! silently drops taps arriving too soon. A strike that reaches cells inside
//! the artifact's inscribed circle (cells already exposed, or exposed by
//! this very strike) counts as one hit against the damage ladder, no matter
//! how many cells qualified. Feedback fires only when dirt actually moved.

use glam::Vec2;

use super::effects::EffectArena;
use super::{Tool, ToolContext, ToolKind};
use crate::events::{AudioCue, GameEvent};
use crate::renderer::Framebuffer;
use crate::viewport::Viewport;

pub struct ShovelTool {
    last_strike_ms: f64,
    fx: EffectArena,
}

impl ShovelTool {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            last_strike_ms: f64::NEG_INFINITY,
            fx: EffectArena::new(seed, max_particles),
        }
    }

    fn strike(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        let (gx, gy) = ctx.viewport.to_grid(pos);
        let tuning = &ctx.tuning.shovel;
        let radius = tuning.radius_cells;
        let reach = radius.ceil() as i32;

        let hitbox = ctx.artifact.hitbox();
        let burial = ctx.artifact.burial_depth;
        let mut removed_any = false;
        let mut struck_cells: Vec<(i32, i32)> = Vec::new();

        for ty in -reach..=reach {
            for tx in -reach..=reach {
                if ((tx * tx + ty * ty) as f32) > radius * radius {
                    continue;
                }
                let (cx, cy) = (gx + tx, gy + ty);
                let Some(delta) = ctx.grid.dig(cx, cy, tuning.dig_depth) else {
                    continue;
                };
                removed_any |= delta.changed();
                if hitbox.contains_cell(cx, cy) && delta.exposed_at(burial) {
                    struck_cells.push((cx, cy));
                }
            }
        }

        if !struck_cells.is_empty() {
            ctx.events.push(GameEvent::ArtifactStruck {
                screen: pos,
                cells: struck_cells,
            });
        }

        if removed_any {
            let ring_radius = radius * ctx.viewport.cell_w.min(ctx.viewport.cell_h);
            self.fx.spawn_ring(pos, ring_radius, EffectArena::impact_color(), ctx.tuning.effects.ring_ms);
            self.fx.spawn_burst(pos, 16, EffectArena::impact_color(), 300.0);
            ctx.audio.push(AudioCue::ShovelThud);
        }
    }
}

impl Tool for ShovelTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Shovel
    }

    fn activate(&mut self, _ctx: &mut ToolContext) {
        self.last_strike_ms = f64::NEG_INFINITY;
    }

    fn update(&mut self, _ctx: &mut ToolContext, dt_ms: f32) {
        self.fx.update(dt_ms);
    }

    fn deactivate(&mut self, _ctx: &mut ToolContext) {
        self.fx.clear();
    }

    fn pointer_down(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        if ctx.now_ms - self.last_strike_ms < ctx.tuning.shovel.cooldown_ms as f64 {
            return;
        }
        self.strike(pos, ctx);
        self.last_strike_ms = ctx.now_ms;
    }

    fn render_overlay(&mut self, frame: &mut Framebuffer, vp: &Viewport) {
        self.fx.draw(frame, vp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigConfig;
    use crate::sim::{Artifact, DirtGrid, GridRect};
    use crate::viewport::Viewport;

    struct Harness {
        grid: DirtGrid,
        artifact: Artifact,
        vp: Viewport,
        cfg: DigConfig,
    }

    fn harness() -> Harness {
        let cfg = DigConfig::default();
        let vp = Viewport::compute(640, 1136, &cfg.viewport);
        Harness {
            grid: DirtGrid::new(vp.grid_w, vp.grid_h, 60),
            artifact: Artifact {
                footprint: GridRect::new(15, 30, 10, 10),
                burial_depth: 50,
            },
            vp,
            cfg,
        }
    }

    fn strike_at(
        tool: &mut ShovelTool,
        h: &mut Harness,
        pos: Vec2,
        now_ms: f64,
    ) -> (Vec<GameEvent>, Vec<AudioCue>) {
        let mut events = Vec::new();
        let mut audio = Vec::new();
        let mut ctx = ToolContext {
            grid: &mut h.grid,
            artifact: &h.artifact,
            trash: &[],
            viewport: &h.vp,
            tuning: &h.cfg,
            events: &mut events,
            audio: &mut audio,
            now_ms,
        };
        tool.pointer_down(pos, &mut ctx);
        (events, audio)
    }

    #[test]
    fn strike_clears_a_disc() {
        let mut h = harness();
        let mut tool = ShovelTool::new(1, 64);
        let pos = h.vp.to_screen(5, 5);
        let (_, audio) = strike_at(&mut tool, &mut h, pos, 0.0);
        assert_eq!(audio, vec![AudioCue::ShovelThud]);
        // Center of the disc lost dig_depth.
        assert_eq!(h.grid.depth(5, 5), Some(50));
        // Inside the radius-3 disc.
        assert_eq!(h.grid.depth(7, 5), Some(50));
        // Outside it.
        assert_eq!(h.grid.depth(9, 5), Some(60));
    }

    #[test]
    fn cooldown_silently_drops_rapid_strikes() {
        let mut h = harness();
        let mut tool = ShovelTool::new(1, 64);
        let pos = h.vp.to_screen(5, 5);
        strike_at(&mut tool, &mut h, pos, 0.0);
        // 100ms later: dropped, no dig, no cue.
        let (events, audio) = strike_at(&mut tool, &mut h, pos, 100.0);
        assert!(events.is_empty() && audio.is_empty());
        assert_eq!(h.grid.depth(5, 5), Some(50));
        // Past the cooldown it lands again.
        let (_, audio) = strike_at(&mut tool, &mut h, pos, 300.0);
        assert_eq!(audio, vec![AudioCue::ShovelThud]);
        assert_eq!(h.grid.depth(5, 5), Some(40));
    }

    #[test]
    fn deep_strike_over_artifact_does_not_qualify() {
        let mut h = harness();
        let mut tool = ShovelTool::new(1, 64);
        // Artifact buried at 50; first strike leaves cells at 50 <= 50, so it
        // *does* expose. Bury deeper to test the non-qualifying case.
        h.artifact.burial_depth = 40;
        let pos = h.vp.to_screen(20, 35);
        let (events, _) = strike_at(&mut tool, &mut h, pos, 0.0);
        // 60 -> 50, still above burial depth 40: no hit event.
        assert!(events.is_empty());
    }

    #[test]
    fn exposing_strike_qualifies_once() {
        let mut h = harness();
        let mut tool = ShovelTool::new(1, 64);
        let pos = h.vp.to_screen(20, 35);
        // 60 -> 50 crosses burial depth 50 for every cell in the disc.
        let (events, _) = strike_at(&mut tool, &mut h, pos, 0.0);
        match &events[..] {
            [GameEvent::ArtifactStruck { cells, .. }] => {
                assert!(!cells.is_empty());
                // All qualifying cells are inside the inscribed circle.
                for &(x, y) in cells {
                    assert!(h.artifact.hitbox().contains_cell(x, y));
                }
            }
            other => panic!("expected one strike event, got {other:?}"),
        }
    }

    #[test]
    fn bare_ground_strike_gives_no_feedback() {
        let mut h = harness();
        let mut tool = ShovelTool::new(1, 64);
        // Clear a patch far from the artifact completely.
        for y in 0..12 {
            for x in 0..12 {
                h.grid.dig(x, y, 60);
            }
        }
        let pos = h.vp.to_screen(5, 5);
        let (events, audio) = strike_at(&mut tool, &mut h, pos, 0.0);
        assert!(events.is_empty());
        assert!(audio.is_empty(), "no thud when nothing moved");
    }

    #[test]
    fn strike_off_grid_is_harmless() {
        let mut h = harness();
        let mut tool = ShovelTool::new(1, 64);
        let (events, audio) = strike_at(&mut tool, &mut h, Vec2::new(-100.0, -100.0), 0.0);
        assert!(events.is_empty() && audio.is_empty());
    }
}
