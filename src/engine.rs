//! The excavation engine: phase machine, tick loop, narrative wiring
//!
//! The engine owns every piece of session state and is the only place where
//! tools, grid, narrative latches, and renderer meet. The host drives it:
//! `tick(dt_ms)` once per display frame, pointer events as they arrive,
//! `resize` when the surface changes. Simulation only runs in the `Playing`
//! phase; the other phases are static displays owned by the host UI.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use crate::config::DigConfig;
use crate::error::EngineError;
use crate::events::{AudioCue, GameEvent};
use crate::renderer::{Color, Framebuffer, SceneRenderer, Theme};
use crate::session::SiteSpec;
use crate::sim::narrative::DamageOutcome;
use crate::sim::{
    Artifact, DirtGrid, NarrativeState, TrashItem, place_artifact, place_trash,
    artifact::rescale_canonical,
};
use crate::tools::{ToolContext, ToolKind, ToolSet};
use crate::viewport::Viewport;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Seed used when the site spec does not carry one.
const DEFAULT_SEED: u64 = 0xD16_517E;

/// Letterbox color outside the play area.
const BACKDROP: Color = [0x14, 0x10, 0x0c, 0xff];

/// Session phase. Only `Playing` simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Splash,
    Playing,
    Discovered,
    MuseumPreview,
}

/// Cloneable handle that can halt the tick loop from anywhere, including
/// from inside a callback fired during the current tick. The tick in
/// progress finishes; no further ticks run.
#[derive(Clone)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(false);
    }
}

/// Host-facing narrative callbacks. Each fires at most once per latch per
/// session; see [`NarrativeState`].
#[derive(Default)]
struct Callbacks {
    revealed70: Option<Box<dyn FnMut()>>,
    revealed95: Option<Box<dyn FnMut()>>,
    artifact_damage: Option<Box<dyn FnMut(u8)>>,
    artifact_break: Option<Box<dyn FnMut()>>,
    trash_revealed: Option<Box<dyn FnMut(usize, f32, f32, &str)>>,
}

/// Builds a [`ToolContext`] from disjoint engine fields so tool dispatch and
/// the borrow checker stay on speaking terms.
macro_rules! tool_ctx {
    ($self:ident) => {
        ToolContext {
            grid: &mut $self.grid,
            artifact: &$self.artifact,
            trash: &$self.trash,
            viewport: &$self.viewport,
            tuning: &$self.config,
            events: &mut $self.events,
            audio: &mut $self.audio,
            now_ms: $self.clock_ms,
        }
    };
}

pub struct DigEngine {
    config: DigConfig,
    site: SiteSpec,
    theme: Theme,

    grid: DirtGrid,
    artifact: Artifact,
    trash: Vec<TrashItem>,
    viewport: Viewport,

    tools: ToolSet,
    narrative: NarrativeState,
    /// Narrative-level effects (damage warnings, milestone text); tools keep
    /// their own arenas.
    overlay: crate::tools::EffectArena,

    events: Vec<GameEvent>,
    audio: Vec<AudioCue>,
    callbacks: Callbacks,

    renderer: SceneRenderer,
    frame: Framebuffer,

    phase: Phase,
    running: Rc<Cell<bool>>,
    clock_ms: f64,
    uncovered_pct: f32,
    rng: Pcg32,
}

impl DigEngine {
    /// Build a session from the host surface size, the server's site spec,
    /// and tuning. Fails fast on configuration the simulation cannot run on;
    /// nothing after construction returns an error.
    pub fn new(
        avail_w: u32,
        avail_h: u32,
        site: SiteSpec,
        config: DigConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if avail_w == 0 || avail_h == 0 {
            return Err(EngineError::EmptySurface { width: avail_w, height: avail_h });
        }
        if site.dirt_materials.is_empty() {
            return Err(EngineError::NoMaterials);
        }
        let theme = Theme {
            biome: site.biome,
            base_color: site.base_material().base_color(),
            border_color: site.border_rgb()?,
        };

        let seed = site.seed.unwrap_or(DEFAULT_SEED);
        let mut rng = Pcg32::seed_from_u64(seed);
        let viewport = Viewport::compute(avail_w, avail_h, &config.viewport);
        let grid = DirtGrid::new(viewport.grid_w, viewport.grid_h, config.placement.max_depth);
        let artifact = place_artifact(&site.artifact, grid.width(), grid.height(), &config.placement);
        let trash = Self::scatter_trash(&site, &config, &artifact, &viewport, &mut rng);
        log::info!(
            "session start: {}x{} grid, artifact at {:?}, {} trash item(s)",
            grid.width(),
            grid.height(),
            artifact.footprint,
            trash.len()
        );

        Ok(Self {
            narrative: NarrativeState::new(trash.len()),
            tools: ToolSet::new(seed ^ 0x700_15, config.effects.max_particles),
            overlay: crate::tools::EffectArena::new(seed ^ 0x0f_f0, config.effects.max_particles),
            events: Vec::new(),
            audio: Vec::new(),
            callbacks: Callbacks::default(),
            renderer: SceneRenderer::new(seed),
            frame: Framebuffer::new(avail_w, avail_h),
            phase: Phase::Splash,
            running: Rc::new(Cell::new(false)),
            clock_ms: 0.0,
            uncovered_pct: 0.0,
            config,
            site,
            theme,
            grid,
            artifact,
            trash,
            viewport,
            rng,
        })
    }

    fn scatter_trash(
        site: &SiteSpec,
        config: &DigConfig,
        artifact: &Artifact,
        viewport: &Viewport,
        rng: &mut Pcg32,
    ) -> Vec<TrashItem> {
        let count = site.trash_count.unwrap_or(config.placement.trash_count);
        let (cw, ch) = config.placement.trash_footprint;
        place_trash(
            artifact,
            viewport.grid_w,
            viewport.grid_h,
            count,
            rescale_canonical(cw, viewport.grid_w).max(1),
            rescale_canonical(ch, viewport.grid_h).max(1),
            &config.placement,
            rng,
        )
    }

    // === lifecycle ===

    /// Arm the tick loop. Idempotent: calling while running is a no-op.
    pub fn start(&mut self) {
        if self.running.get() {
            return;
        }
        self.running.set(true);
    }

    /// Prevent any further ticks. Safe from anywhere, any number of times.
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// A handle for host callbacks that need to halt the loop mid-tick.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Rc::clone(&self.running))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    // === callbacks ===

    pub fn on_revealed70(&mut self, f: impl FnMut() + 'static) {
        self.callbacks.revealed70 = Some(Box::new(f));
    }

    pub fn on_revealed95(&mut self, f: impl FnMut() + 'static) {
        self.callbacks.revealed95 = Some(Box::new(f));
    }

    /// `level` is 1 (first warning) or 2 (cracking).
    pub fn on_artifact_damage(&mut self, f: impl FnMut(u8) + 'static) {
        self.callbacks.artifact_damage = Some(Box::new(f));
    }

    pub fn on_artifact_break(&mut self, f: impl FnMut() + 'static) {
        self.callbacks.artifact_break = Some(Box::new(f));
    }

    /// `(index, screen_x, screen_y, message)` per trash narrative beat.
    pub fn on_trash_revealed(&mut self, f: impl FnMut(usize, f32, f32, &str) + 'static) {
        self.callbacks.trash_revealed = Some(Box::new(f));
    }

    // === input ===

    pub fn select_tool(&mut self, kind: Option<ToolKind>) {
        self.tools.select(kind, &mut tool_ctx!(self));
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.tools.active()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.phase != Phase::Playing {
            return;
        }
        let pos = Vec2::new(x, y);
        self.tools.pointer_down(pos, &mut tool_ctx!(self));
        self.process_events();
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.phase != Phase::Playing {
            return;
        }
        let pos = Vec2::new(x, y);
        self.tools.pointer_move(pos, &mut tool_ctx!(self));
        self.process_events();
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        if self.phase != Phase::Playing {
            return;
        }
        let pos = Vec2::new(x, y);
        self.tools.pointer_up(pos, &mut tool_ctx!(self));
    }

    /// The host surface changed size. The play area is always recomputed;
    /// the grid is rebuilt (losing dig progress) only when the derived
    /// resolution actually changed.
    pub fn resize(&mut self, avail_w: u32, avail_h: u32) {
        if avail_w == 0 || avail_h == 0 {
            log::warn!("ignoring zero-area resize {avail_w}x{avail_h}");
            return;
        }
        let vp = Viewport::compute(avail_w, avail_h, &self.config.viewport);
        let resolution_changed =
            vp.grid_w != self.viewport.grid_w || vp.grid_h != self.viewport.grid_h;
        self.viewport = vp;
        self.frame.resize(avail_w, avail_h);

        if resolution_changed {
            log::info!(
                "grid resolution changed to {}x{}; rebuilding dirt layer",
                vp.grid_w,
                vp.grid_h
            );
            self.grid = DirtGrid::new(vp.grid_w, vp.grid_h, self.config.placement.max_depth);
            self.artifact =
                place_artifact(&self.site.artifact, vp.grid_w, vp.grid_h, &self.config.placement);
            self.trash =
                Self::scatter_trash(&self.site, &self.config, &self.artifact, &vp, &mut self.rng);
            // Milestone and damage latches survive a rebuild; the per-item
            // trash records belong to the re-placed items.
            self.narrative.reset_trash(self.trash.len());
            self.uncovered_pct = 0.0;
        }
    }

    // === tick ===

    /// Advance one frame: tool update, narrative, render. `dt_ms` is the real
    /// elapsed time since the previous tick; cooldowns and particle
    /// lifetimes depend on it, not on any assumed frame rate.
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.running.get() || self.phase != Phase::Playing {
            return;
        }
        self.clock_ms += dt_ms as f64;

        self.tools.update(&mut tool_ctx!(self), dt_ms);
        self.process_events();

        self.uncovered_pct = self.grid.reveal_percentage(
            &self.artifact.footprint,
            self.artifact.burial_depth,
            self.config.reveal.tolerance,
        );
        let crossing = self.narrative.note_reveal(
            self.uncovered_pct,
            self.config.reveal.hint_pct,
            self.config.reveal.discovery_pct,
        );
        if crossing.hint {
            log::info!("artifact {:.0}% revealed", self.uncovered_pct);
            let pos = Vec2::new(
                self.viewport.origin_x as f32 + self.viewport.play_w as f32 / 2.0,
                self.viewport.origin_y as f32 + self.viewport.play_h as f32 * 0.12,
            );
            self.overlay
                .spawn_text(pos, "It's beautiful, keep going!", self.config.effects.floating_text_ms);
            if let Some(cb) = self.callbacks.revealed70.as_mut() {
                cb();
            }
        }
        if crossing.discovery {
            log::info!("artifact discovery threshold reached");
            self.audio.push(AudioCue::RevealFanfare);
            if let Some(cb) = self.callbacks.revealed95.as_mut() {
                cb();
            }
        }

        self.overlay.update(dt_ms);
        self.render();
    }

    /// Route tool events through the latch table and host callbacks.
    fn process_events(&mut self) {
        if self.events.is_empty() {
            return;
        }
        for ev in std::mem::take(&mut self.events) {
            match ev {
                GameEvent::ArtifactStruck { screen, cells } => {
                    match self.narrative.damage.register_hit() {
                        Some(DamageOutcome::Warned(level)) => {
                            let text = if level == 1 {
                                "Careful! The shovel hits too hard!"
                            } else {
                                "Stop! It's cracking!"
                            };
                            log::info!("artifact damaged (level {level})");
                            self.overlay.spawn_text(
                                screen - Vec2::new(0.0, 12.0),
                                text,
                                self.config.effects.floating_text_ms,
                            );
                            self.overlay.spawn_warning_burst(screen, 14);
                            self.overlay.flash_cells(&cells, self.config.effects.flash_ms);
                            self.audio.push(AudioCue::CrackWarning);
                            if let Some(cb) = self.callbacks.artifact_damage.as_mut() {
                                cb(level);
                            }
                        }
                        Some(DamageOutcome::Broke) => {
                            log::info!("artifact broken");
                            self.audio.push(AudioCue::Shatter);
                            if let Some(cb) = self.callbacks.artifact_break.as_mut() {
                                cb();
                            }
                        }
                        // Already broken: further strikes are silent.
                        None => {}
                    }
                }
                GameEvent::TrashCellRevealed { index, screen } => {
                    let Some(item) = self.trash.get(index) else { continue };
                    let pct = self.grid.reveal_percentage(
                        &item.footprint,
                        item.burial_depth,
                        self.config.reveal.tolerance,
                    );
                    if let Some(msg) = self.narrative.note_trash_cell(index, pct) {
                        log::debug!("trash {index} narrative: {msg:?}");
                        self.overlay.spawn_text(
                            screen - Vec2::new(0.0, 10.0),
                            msg.text(),
                            self.config.effects.floating_text_ms,
                        );
                        if let Some(cb) = self.callbacks.trash_revealed.as_mut() {
                            cb(index, screen.x, screen.y, msg.text());
                        }
                    }
                }
            }
        }
    }

    fn render(&mut self) {
        self.frame.clear(BACKDROP);
        self.renderer.render(
            &mut self.frame,
            &self.grid,
            &self.artifact,
            &self.trash,
            &self.theme,
            &self.viewport,
        );
        self.tools.render_overlay(&mut self.frame, &self.viewport);
        self.overlay.draw(&mut self.frame, &self.viewport);
    }

    // === queries ===

    pub fn uncovered_percentage(&self) -> f32 {
        self.uncovered_pct
    }

    pub fn is_damaged(&self) -> bool {
        self.narrative.damage.is_damaged()
    }

    pub fn is_broken(&self) -> bool {
        self.narrative.damage.is_broken()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn grid(&self) -> &DirtGrid {
        &self.grid
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn trash(&self) -> &[TrashItem] {
        &self.trash
    }

    /// Rendered RGBA frame for the host to present.
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn frame_bytes(&self) -> &[u8] {
        self.frame.data()
    }

    /// Take the pending sound cues. Drain once per frame.
    pub fn drain_audio(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.audio)
    }
}
