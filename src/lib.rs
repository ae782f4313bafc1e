//! Dig Site - a pixel-art excavation mini-game core
//!
//! Players sweep a detector, swing a shovel, and work a brush to clear a
//! simulated dirt layer off a hidden artifact without breaking it.
//!
//! Core modules:
//! - `sim`: deterministic simulation (dirt grid, placement, narrative latches)
//! - `viewport`: aspect-locked, pixel-snapped play-area mapping
//! - `tools`: the three tool state machines and their transient effects
//! - `engine`: the orchestrator the host drives (ticks, input, callbacks)
//! - `renderer`: CPU scene rendering into an RGBA framebuffer
//! - `audio`: procedural sound synthesis (wasm)
//! - `session` / `config`: the server bootstrap contract and tuning-as-data

pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tools;
pub mod viewport;

pub use config::DigConfig;
pub use engine::{DigEngine, Phase, StopHandle};
pub use error::EngineError;
pub use session::SiteSpec;
pub use tools::ToolKind;

use glam::Vec2;

/// Fixed baseline values. Everything gameplay-tunable lives in
/// [`config::DigConfig`]; these are the contract constants and the defaults
/// it starts from.
pub mod consts {
    /// Side length of the canonical placement space artifacts are specified
    /// in. Part of the server contract, not tunable.
    pub const CANONICAL_SIZE: f32 = 100.0;

    /// Default initial dirt depth per cell.
    pub const MAX_DEPTH: u8 = 60;

    /// Default on-screen size of one grid cell ("big pixel").
    pub const CELL_SIZE_PX: u32 = 16;

    /// Default portrait play-area aspect (width / height).
    pub const ASPECT_RATIO: f32 = 9.0 / 16.0;

    /// Default grid floor per axis.
    pub const MIN_GRID_DIM: usize = 10;

    /// Default total cell budget.
    pub const MAX_GRID_CELLS: usize = 150_000;
}

/// Center of a grid cell in grid-space coordinates. All hitbox tests measure
/// from cell centers.
#[inline]
pub fn cell_center(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Wire up panic reporting and console logging. Wasm hosts call this once
/// before constructing the engine.
#[cfg(target_arch = "wasm32")]
pub fn init_wasm_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
