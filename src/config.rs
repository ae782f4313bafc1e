//! Game tuning as data
//!
//! Every numeric knob of the simulation lives here with the shipped values
//! as defaults. Only the relative ordering of these values is load-bearing
//! (e.g. the brush must dig less than the shovel, the proximity tiers must be
//! increasing); hosts may rebalance freely.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::EngineError;
use crate::events::ProximityTier;

/// Top-level tuning bundle handed to the engine at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigConfig {
    pub viewport: ViewportTuning,
    pub placement: PlacementTuning,
    pub reveal: RevealTuning,
    pub detector: DetectorTuning,
    pub shovel: ShovelTuning,
    pub brush: BrushTuning,
    pub effects: EffectTuning,
}

impl DigConfig {
    /// Reject configurations the simulation cannot run on. Called once by the
    /// engine constructor; everything downstream trusts the values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.viewport.aspect_ratio <= 0.0 {
            return Err(EngineError::InvalidTuning("aspect_ratio must be positive"));
        }
        if self.viewport.cell_size_px == 0 {
            return Err(EngineError::InvalidTuning("cell_size_px must be at least 1"));
        }
        if self.viewport.min_grid_dim == 0 {
            return Err(EngineError::InvalidTuning("min_grid_dim must be at least 1"));
        }
        if self.placement.burial_min > self.placement.burial_max {
            return Err(EngineError::InvalidTuning("burial band is inverted"));
        }
        if self.placement.burial_max > self.placement.max_depth {
            return Err(EngineError::InvalidTuning("burial band exceeds max depth"));
        }
        if self.shovel.radius_cells <= 0.0 || self.brush.radius_cells <= 0.0 {
            return Err(EngineError::InvalidTuning("tool radius must be positive"));
        }
        if !(self.detector.very_close_cells < self.detector.close_cells
            && self.detector.close_cells < self.detector.far_cells)
        {
            return Err(EngineError::InvalidTuning("detector tiers must be increasing"));
        }
        Ok(())
    }
}

/// Play-area fitting and grid derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportTuning {
    /// Desired width/height ratio of the play area (portrait by default).
    pub aspect_ratio: f32,
    /// Size of one "big pixel" grid cell on screen.
    pub cell_size_px: u32,
    /// Floor for each grid axis.
    pub min_grid_dim: usize,
    /// Total cell budget; larger grids are scaled down uniformly.
    pub max_grid_cells: usize,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            aspect_ratio: consts::ASPECT_RATIO,
            cell_size_px: consts::CELL_SIZE_PX,
            min_grid_dim: consts::MIN_GRID_DIM,
            max_grid_cells: consts::MAX_GRID_CELLS,
        }
    }
}

/// Artifact/trash placement parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementTuning {
    /// Initial (and maximum) dirt depth of every cell.
    pub max_depth: u8,
    /// Burial depth band: always reachable, never trivially on the surface.
    pub burial_min: u8,
    pub burial_max: u8,
    /// Trash items to attempt when the site spec doesn't say.
    pub trash_count: usize,
    /// Trash footprint in canonical (0..100) units, rescaled like the artifact.
    pub trash_footprint: (f32, f32),
    /// Placement attempts before giving up on the remaining items.
    pub retry_budget: u32,
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            max_depth: consts::MAX_DEPTH,
            burial_min: 40,
            burial_max: 60,
            trash_count: 2,
            trash_footprint: (12.0, 12.0),
            retry_budget: 2000,
        }
    }
}

/// Reveal-percentage thresholds and tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTuning {
    /// Extra depth slack when counting a cell as uncovered. 0 is the strict
    /// rule; raise it for a more forgiving read.
    pub tolerance: u8,
    /// "Keep going" hint threshold.
    pub hint_pct: f32,
    /// Discovery celebration threshold.
    pub discovery_pct: f32,
}

impl Default for RevealTuning {
    fn default() -> Self {
        Self { tolerance: 0, hint_pct: 70.0, discovery_pct: 95.0 }
    }
}

/// Detector proximity tiers, as cell distances to the hitbox boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorTuning {
    pub very_close_cells: f32,
    pub close_cells: f32,
    pub far_cells: f32,
}

impl Default for DetectorTuning {
    fn default() -> Self {
        Self { very_close_cells: 1.0, close_cells: 3.0, far_cells: 6.0 }
    }
}

impl DetectorTuning {
    /// Bucket a boundary distance into a proximity tier.
    pub fn tier_for(&self, boundary_distance: f32) -> ProximityTier {
        if boundary_distance < self.very_close_cells {
            ProximityTier::VeryClose
        } else if boundary_distance < self.close_cells {
            ProximityTier::Close
        } else if boundary_distance < self.far_cells {
            ProximityTier::Far
        } else {
            ProximityTier::VeryFar
        }
    }
}

/// Shovel strike parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShovelTuning {
    /// Strikes arriving sooner than this are silently dropped.
    pub cooldown_ms: f32,
    /// Depth removed from every cell in the strike disc.
    pub dig_depth: u8,
    /// Strike disc radius in grid cells (two cells plus one of spill).
    pub radius_cells: f32,
}

impl Default for ShovelTuning {
    fn default() -> Self {
        Self { cooldown_ms: 250.0, dig_depth: 10, radius_cells: 3.0 }
    }
}

/// Brush stroke parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushTuning {
    /// Depth removed per affected cell per stroke step. Gentle by design.
    pub dig_depth: u8,
    /// Stroke radius in grid cells; smaller than the shovel.
    pub radius_cells: f32,
    /// Chance of a cosmetic dust particle per affected cell.
    pub dust_chance: f32,
    /// Minimum gap between rustle cues while brushing.
    pub rustle_interval_ms: f32,
}

impl Default for BrushTuning {
    fn default() -> Self {
        Self { dig_depth: 1, radius_cells: 1.5, dust_chance: 0.3, rustle_interval_ms: 150.0 }
    }
}

/// Transient visual effect lifetimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    pub max_particles: usize,
    pub floating_text_ms: f32,
    pub ring_ms: f32,
    pub flash_ms: f32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self { max_particles: 256, floating_text_ms: 3200.0, ring_ms: 180.0, flash_ms: 260.0 }
    }
}
