//! Construction-time error taxonomy
//!
//! The simulation itself never fails: out-of-bounds access clamps, cooldown
//! violations and repeated latch firings are silent no-ops, and placement
//! exhaustion degrades to a partial fill. Everything that *can* fail does so
//! once, at engine construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The host handed us a surface we cannot draw into.
    #[error("drawing surface has zero area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    /// The site spec arrived without any dirt material.
    #[error("dirt material list is empty")]
    NoMaterials,

    /// A border color string that is not `#RRGGBB`.
    #[error("invalid border color {0:?}")]
    BadBorderColor(String),

    /// A tuning value outside its sane range.
    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),
}
