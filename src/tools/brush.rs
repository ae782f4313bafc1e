//! The brush: slow, gentle, and the only way to meet the trash
//!
//! Holding the pointer down and moving it sweeps a small disc that shaves one
//! unit of depth per cell, pops the occasional dust mote, and watches for
//! trash cells dropping through their burial threshold so the engine can run
//! its "what is that..?" patter. The brush cannot damage the artifact.

use glam::Vec2;

use super::effects::EffectArena;
use super::{Tool, ToolContext, ToolKind};
use crate::events::{AudioCue, GameEvent};
use crate::renderer::Framebuffer;
use crate::viewport::Viewport;

pub struct BrushTool {
    brushing: bool,
    last_pos: Option<Vec2>,
    last_rustle_ms: f64,
    fx: EffectArena,
}

impl BrushTool {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            brushing: false,
            last_pos: None,
            last_rustle_ms: f64::NEG_INFINITY,
            fx: EffectArena::new(seed, max_particles),
        }
    }

    fn stroke(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        let (gx, gy) = ctx.viewport.to_grid(pos);
        let tuning = &ctx.tuning.brush;
        let radius = tuning.radius_cells;
        let reach = radius.ceil() as i32;
        let mut moved_dirt = false;

        for ty in -reach..=reach {
            for tx in -reach..=reach {
                if ((tx * tx + ty * ty) as f32) > radius * radius {
                    continue;
                }
                let (cx, cy) = (gx + tx, gy + ty);
                let Some(delta) = ctx.grid.dig(cx, cy, tuning.dig_depth) else {
                    continue;
                };
                if !delta.changed() {
                    continue;
                }
                moved_dirt = true;
                self.fx
                    .maybe_spawn_dust(ctx.viewport.to_screen(cx, cy), tuning.dust_chance);

                // Did this stroke just bring a trash cell into view?
                for (index, item) in ctx.trash.iter().enumerate() {
                    if item.hitbox().contains_cell(cx, cy) && delta.crossed(item.burial_depth) {
                        ctx.events.push(GameEvent::TrashCellRevealed {
                            index,
                            screen: ctx.viewport.to_screen(cx, cy),
                        });
                    }
                }
            }
        }

        if moved_dirt && ctx.now_ms - self.last_rustle_ms >= tuning.rustle_interval_ms as f64 {
            ctx.audio.push(AudioCue::BrushRustle);
            self.last_rustle_ms = ctx.now_ms;
        }
    }
}

impl Tool for BrushTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Brush
    }

    fn activate(&mut self, _ctx: &mut ToolContext) {
        self.brushing = false;
        self.last_pos = None;
    }

    fn update(&mut self, _ctx: &mut ToolContext, dt_ms: f32) {
        self.fx.update(dt_ms);
    }

    fn deactivate(&mut self, _ctx: &mut ToolContext) {
        self.brushing = false;
        self.last_pos = None;
        self.fx.clear();
    }

    fn pointer_down(&mut self, pos: Vec2, _ctx: &mut ToolContext) {
        self.brushing = true;
        self.last_pos = Some(pos);
    }

    fn pointer_move(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        if !self.brushing {
            return;
        }
        // Bridge fast pointer moves so the stroke stays continuous.
        if let Some(prev) = self.last_pos {
            let gap = ctx.viewport.cell_w.min(ctx.viewport.cell_h) * 1.5;
            if prev.distance(pos) > gap {
                self.stroke((prev + pos) * 0.5, ctx);
            }
        }
        self.stroke(pos, ctx);
        self.last_pos = Some(pos);
    }

    fn pointer_up(&mut self, _pos: Vec2, _ctx: &mut ToolContext) {
        self.brushing = false;
        self.last_pos = None;
    }

    fn render_overlay(&mut self, frame: &mut Framebuffer, vp: &Viewport) {
        self.fx.draw(frame, vp);
    }
}
