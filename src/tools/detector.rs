//! The detector: taps report proximity to the buried find
//!
//! Fires only on discrete pointer-downs, never on hold or sweep. The reported
//! distance is measured from the tapped cell's center to the artifact's
//! inscribed-circle *boundary*, so a tap anywhere over the find reads as
//! distance zero. Never mutates the grid.

use glam::Vec2;

use super::effects::EffectArena;
use super::{Tool, ToolContext, ToolKind};
use crate::events::AudioCue;
use crate::renderer::Framebuffer;
use crate::viewport::Viewport;

pub struct DetectorTool {
    fx: EffectArena,
}

impl DetectorTool {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            fx: EffectArena::new(seed, max_particles),
        }
    }
}

impl Tool for DetectorTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Detector
    }

    fn update(&mut self, _ctx: &mut ToolContext, dt_ms: f32) {
        self.fx.update(dt_ms);
    }

    fn deactivate(&mut self, _ctx: &mut ToolContext) {
        self.fx.clear();
    }

    fn pointer_down(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        if !ctx.viewport.contains_screen(pos) {
            return;
        }
        let (gx, gy) = ctx.viewport.to_grid(pos);
        let distance = ctx.artifact.hitbox().boundary_distance(gx, gy);
        let tier = ctx.tuning.detector.tier_for(distance);
        log::debug!("detector ping at ({gx},{gy}): {distance:.2} cells -> {tier:?}");

        let base = ctx.viewport.cell_w.min(ctx.viewport.cell_h);
        let radius = (base * 5.0).max(40.0);
        self.fx.spawn_ripples(pos, radius, tier.ripple_color());
        ctx.audio.push(AudioCue::DetectorPing(tier));
    }

    fn render_overlay(&mut self, frame: &mut Framebuffer, vp: &Viewport) {
        self.fx.draw(frame, vp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigConfig;
    use crate::events::ProximityTier;
    use crate::sim::{Artifact, DirtGrid, GridRect};
    use crate::viewport::Viewport;

    fn harness() -> (DirtGrid, Artifact, Viewport, DigConfig) {
        let cfg = DigConfig::default();
        let vp = Viewport::compute(640, 1136, &cfg.viewport);
        let grid = DirtGrid::new(vp.grid_w, vp.grid_h, 60);
        // Radius-5 circle centered at (20, 35).
        let artifact = Artifact {
            footprint: GridRect::new(15, 30, 10, 10),
            burial_depth: 50,
        };
        (grid, artifact, vp, cfg)
    }

    fn ping(
        tool: &mut DetectorTool,
        pos: Vec2,
        grid: &mut DirtGrid,
        artifact: &Artifact,
        vp: &Viewport,
        cfg: &DigConfig,
    ) -> Vec<AudioCue> {
        let mut events = Vec::new();
        let mut audio = Vec::new();
        let mut ctx = ToolContext {
            grid,
            artifact,
            trash: &[],
            viewport: vp,
            tuning: cfg,
            events: &mut events,
            audio: &mut audio,
            now_ms: 0.0,
        };
        tool.pointer_down(pos, &mut ctx);
        audio
    }

    #[test]
    fn tap_on_boundary_reads_very_close() {
        let (mut grid, artifact, vp, cfg) = harness();
        let mut tool = DetectorTool::new(1, 64);
        // Cell (25, 35): center (25.5, 35.5), ~0.7 cells past the rim.
        let cues = ping(&mut tool, vp.to_screen(25, 35), &mut grid, &artifact, &vp, &cfg);
        assert_eq!(cues, vec![AudioCue::DetectorPing(ProximityTier::VeryClose)]);
    }

    #[test]
    fn tap_ten_cells_out_reads_very_far() {
        let (mut grid, artifact, vp, cfg) = harness();
        let mut tool = DetectorTool::new(1, 64);
        // Cell (35, 35) is ~10 cells right of the rim of a radius-5 circle.
        let cues = ping(&mut tool, vp.to_screen(35, 35), &mut grid, &artifact, &vp, &cfg);
        assert_eq!(cues, vec![AudioCue::DetectorPing(ProximityTier::VeryFar)]);
    }

    #[test]
    fn tap_outside_play_area_is_silent() {
        let (mut grid, artifact, vp, cfg) = harness();
        let mut tool = DetectorTool::new(1, 64);
        let cues = ping(&mut tool, Vec2::new(-5.0, 10.0), &mut grid, &artifact, &vp, &cfg);
        assert!(cues.is_empty());
        assert!(tool.fx.is_empty());
    }

    #[test]
    fn detector_never_digs() {
        let (mut grid, artifact, vp, cfg) = harness();
        let mut tool = DetectorTool::new(1, 64);
        ping(&mut tool, vp.to_screen(20, 35), &mut grid, &artifact, &vp, &cfg);
        assert_eq!(grid.depth(20, 35), Some(60));
    }
}
