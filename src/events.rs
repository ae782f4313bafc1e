//! Events flowing from tools to the engine, and sound cues flowing out
//!
//! Tools never talk to the host directly. They push `GameEvent`s into the
//! shared context; the engine drains them each tick, advances the narrative
//! latches, and forwards anything noteworthy to the host callbacks. `AudioCue`
//! is the one-way stream the host (or the wasm [`crate::audio`] layer) drains
//! to make noise.

use glam::Vec2;

/// How close a detector ping landed to the artifact's hitbox boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityTier {
    VeryClose,
    Close,
    Far,
    VeryFar,
}

impl ProximityTier {
    /// Ripple color for the ping effect (green through red).
    pub fn ripple_color(&self) -> [u8; 4] {
        match self {
            ProximityTier::VeryClose => [0x00, 0xff, 0x00, 0xff],
            ProximityTier::Close => [0xff, 0xff, 0x00, 0xff],
            ProximityTier::Far => [0xff, 0xa5, 0x00, 0xff],
            ProximityTier::VeryFar => [0xff, 0x00, 0x00, 0xff],
        }
    }

    /// Ping pitch. Higher means warmer.
    pub fn ping_hz(&self) -> f32 {
        match self {
            ProximityTier::VeryClose => 800.0,
            ProximityTier::Close => 600.0,
            ProximityTier::Far => 400.0,
            ProximityTier::VeryFar => 200.0,
        }
    }
}

/// Simulation events emitted by tools, drained by the engine each tick.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A shovel strike qualified as hitting the artifact (at least one cell
    /// inside the inscribed circle was exposed or newly exposed).
    ArtifactStruck {
        /// Strike position in surface pixels, for placing warning effects.
        screen: Vec2,
        /// The qualifying grid cells, for the damage flash.
        cells: Vec<(i32, i32)>,
    },
    /// A brush stroke just dropped a trash cell through its burial threshold.
    TrashCellRevealed { index: usize, screen: Vec2 },
}

/// Procedural sound effects. Synthesis lives in [`crate::audio`] on wasm;
/// native hosts drain and log them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    /// Detector ping, pitch falling with distance.
    DetectorPing(ProximityTier),
    /// Low thud when a shovel strike actually moved dirt.
    ShovelThud,
    /// Soft rustle while brushing (throttled by the brush).
    BrushRustle,
    /// The artifact took a qualifying hit.
    CrackWarning,
    /// Third hit: the artifact is gone.
    Shatter,
    /// The 95% reveal celebration.
    RevealFanfare,
}
