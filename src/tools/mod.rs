//! Excavation tools: detector, shovel, brush
//!
//! Each tool is a small state machine with an activate/update/deactivate
//! lifecycle and optional pointer handlers. Exactly one tool is active at a
//! time; switching deactivates the old one (dropping its transient effects)
//! before activating the next. Tools see the world only through
//! [`ToolContext`], which the engine rebuilds for every call so the mapping
//! is always current screen space.

pub mod brush;
pub mod detector;
pub mod effects;
pub mod shovel;

pub use brush::BrushTool;
pub use detector::DetectorTool;
pub use effects::EffectArena;
pub use shovel::ShovelTool;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::DigConfig;
use crate::events::{AudioCue, GameEvent};
use crate::renderer::Framebuffer;
use crate::sim::{Artifact, DirtGrid, TrashItem};
use crate::viewport::Viewport;

/// Which tool the player is holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Detector,
    Shovel,
    Brush,
}

/// The shared view every tool call receives. All fields reference
/// engine-owned state; tools mutate the grid and push events/cues, nothing
/// else.
pub struct ToolContext<'a> {
    pub grid: &'a mut DirtGrid,
    pub artifact: &'a Artifact,
    pub trash: &'a [TrashItem],
    pub viewport: &'a Viewport,
    pub tuning: &'a DigConfig,
    /// Simulation events for the engine to drain after the call.
    pub events: &'a mut Vec<GameEvent>,
    /// Sound cues for the host to drain.
    pub audio: &'a mut Vec<AudioCue>,
    /// Engine clock in elapsed milliseconds, for cooldowns.
    pub now_ms: f64,
}

/// Tool lifecycle and input contract.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn activate(&mut self, _ctx: &mut ToolContext) {}

    /// Advance transient state (particle lifetimes etc.) by `dt_ms`.
    fn update(&mut self, _ctx: &mut ToolContext, _dt_ms: f32) {}

    /// Clear transient state; called before another tool activates.
    fn deactivate(&mut self, _ctx: &mut ToolContext) {}

    fn pointer_down(&mut self, _pos: Vec2, _ctx: &mut ToolContext) {}
    fn pointer_move(&mut self, _pos: Vec2, _ctx: &mut ToolContext) {}
    fn pointer_up(&mut self, _pos: Vec2, _ctx: &mut ToolContext) {}

    /// Draw transient effects after the main scene.
    fn render_overlay(&mut self, _frame: &mut Framebuffer, _vp: &Viewport) {}
}

/// Owns the three tools and tracks which one is active.
pub struct ToolSet {
    detector: DetectorTool,
    shovel: ShovelTool,
    brush: BrushTool,
    active: Option<ToolKind>,
}

impl ToolSet {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            detector: DetectorTool::new(seed, max_particles),
            shovel: ShovelTool::new(seed.wrapping_add(1), max_particles),
            brush: BrushTool::new(seed.wrapping_add(2), max_particles),
            active: None,
        }
    }

    pub fn active(&self) -> Option<ToolKind> {
        self.active
    }

    fn tool_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Detector => &mut self.detector,
            ToolKind::Shovel => &mut self.shovel,
            ToolKind::Brush => &mut self.brush,
        }
    }

    /// Switch tools: deactivate the old, activate the new. Selecting the
    /// already-active tool is a no-op.
    pub fn select(&mut self, kind: Option<ToolKind>, ctx: &mut ToolContext) {
        if self.active == kind {
            return;
        }
        if let Some(old) = self.active {
            self.tool_mut(old).deactivate(ctx);
        }
        self.active = kind;
        if let Some(new) = kind {
            self.tool_mut(new).activate(ctx);
            log::debug!("tool selected: {new:?}");
        }
    }

    pub fn update(&mut self, ctx: &mut ToolContext, dt_ms: f32) {
        if let Some(kind) = self.active {
            self.tool_mut(kind).update(ctx, dt_ms);
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        if let Some(kind) = self.active {
            self.tool_mut(kind).pointer_down(pos, ctx);
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        if let Some(kind) = self.active {
            self.tool_mut(kind).pointer_move(pos, ctx);
        }
    }

    pub fn pointer_up(&mut self, pos: Vec2, ctx: &mut ToolContext) {
        if let Some(kind) = self.active {
            self.tool_mut(kind).pointer_up(pos, ctx);
        }
    }

    pub fn render_overlay(&mut self, frame: &mut Framebuffer, vp: &Viewport) {
        if let Some(kind) = self.active {
            self.tool_mut(kind).render_overlay(frame, vp);
        }
    }
}
