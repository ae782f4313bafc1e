//! Buried objects and their placement
//!
//! The server describes the artifact in a canonical 100x100 space so the same
//! site plays identically at any grid resolution; placement rescales it into
//! live grid cells. Trash decoys are scattered by rejection sampling with a
//! bounded retry budget; running out of room places fewer items and is not an
//! error.

use rand::Rng;
use rand_pcg::Pcg32;

use super::geom::{CircleHitbox, GridRect};
use crate::config::PlacementTuning;
use crate::consts::CANONICAL_SIZE;
use crate::session::ArtifactSpec;

/// The winnable hidden object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    pub footprint: GridRect,
    pub burial_depth: u8,
}

impl Artifact {
    /// Collision/reveal hitbox: the inscribed circle, not the rectangle.
    pub fn hitbox(&self) -> CircleHitbox {
        CircleHitbox::inscribed(&self.footprint)
    }
}

/// A decoy. Same hitbox rule as the artifact; never blocks, never damages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrashItem {
    pub footprint: GridRect,
    pub burial_depth: u8,
}

impl TrashItem {
    pub fn hitbox(&self) -> CircleHitbox {
        CircleHitbox::inscribed(&self.footprint)
    }
}

/// Rescale a canonical-space coordinate into grid cells.
pub fn rescale_canonical(v: f32, grid_dim: usize) -> i32 {
    (v / CANONICAL_SIZE * grid_dim as f32).round() as i32
}

/// Rescale the server's canonical artifact into the live grid, clamping the
/// burial depth into the reachable band and the footprint to at least one
/// cell per axis.
pub fn place_artifact(
    spec: &ArtifactSpec,
    grid_w: usize,
    grid_h: usize,
    tuning: &PlacementTuning,
) -> Artifact {
    Artifact {
        footprint: GridRect::new(
            rescale_canonical(spec.position.x, grid_w),
            rescale_canonical(spec.position.y, grid_h),
            rescale_canonical(spec.width, grid_w).max(1),
            rescale_canonical(spec.height, grid_h).max(1),
        ),
        burial_depth: spec.depth.clamp(tuning.burial_min, tuning.burial_max),
    }
}

/// Scatter up to `count` trash items of `fw` x `fh` cells, rejecting any
/// candidate whose rectangle overlaps the artifact or an accepted item.
/// Degrades to a partial fill when the retry budget runs out.
pub fn place_trash(
    artifact: &Artifact,
    grid_w: usize,
    grid_h: usize,
    count: usize,
    fw: i32,
    fh: i32,
    tuning: &PlacementTuning,
    rng: &mut Pcg32,
) -> Vec<TrashItem> {
    let mut placed: Vec<TrashItem> = Vec::with_capacity(count);
    let max_x = grid_w as i32 - fw;
    let max_y = grid_h as i32 - fh;
    if count == 0 || fw <= 0 || fh <= 0 || max_x < 0 || max_y < 0 {
        return placed;
    }

    let mut attempts = 0u32;
    while placed.len() < count && attempts < tuning.retry_budget {
        attempts += 1;
        let candidate = GridRect::new(
            rng.random_range(0..=max_x),
            rng.random_range(0..=max_y),
            fw,
            fh,
        );
        if candidate.intersects(&artifact.footprint)
            || placed.iter().any(|t| candidate.intersects(&t.footprint))
        {
            continue;
        }
        placed.push(TrashItem {
            footprint: candidate,
            burial_depth: rng.random_range(tuning.burial_min..=tuning.burial_max),
        });
    }

    if placed.len() < count {
        log::debug!(
            "trash placement exhausted after {attempts} attempts: {} of {count} placed",
            placed.len()
        );
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CanonicalPoint;
    use rand::SeedableRng;

    fn tuning() -> PlacementTuning {
        PlacementTuning::default()
    }

    fn sample_spec() -> ArtifactSpec {
        ArtifactSpec {
            position: CanonicalPoint { x: 50.0, y: 50.0 },
            depth: 50,
            width: 25.0,
            height: 15.0,
        }
    }

    #[test]
    fn rescales_canonical_artifact_near_grid_center() {
        // The 39x71 grid derived from a 640x1136 surface.
        let a = place_artifact(&sample_spec(), 39, 71, &tuning());
        assert_eq!(a.footprint, GridRect::new(20, 36, 10, 11));
        assert_eq!(a.burial_depth, 50);
    }

    #[test]
    fn burial_depth_clamps_into_band() {
        let mut spec = sample_spec();
        spec.depth = 5;
        assert_eq!(place_artifact(&spec, 40, 71, &tuning()).burial_depth, 40);
        spec.depth = 200;
        assert_eq!(place_artifact(&spec, 40, 71, &tuning()).burial_depth, 60);
    }

    #[test]
    fn degenerate_footprint_keeps_one_cell() {
        let spec = ArtifactSpec {
            position: CanonicalPoint { x: 10.0, y: 10.0 },
            depth: 45,
            width: 1.0,
            height: 1.0,
        };
        let a = place_artifact(&spec, 12, 12, &tuning());
        assert_eq!((a.footprint.w, a.footprint.h), (1, 1));
    }

    #[test]
    fn trash_never_overlaps() {
        // Scenario: 12x12 grid, 6x6 artifact at center, two 3x3 decoys.
        let artifact = Artifact {
            footprint: GridRect::new(3, 3, 6, 6),
            burial_depth: 50,
        };
        let mut rng = Pcg32::seed_from_u64(42);
        let trash = place_trash(&artifact, 12, 12, 2, 3, 3, &tuning(), &mut rng);
        assert!(trash.len() <= 2);
        for t in &trash {
            assert!(!t.footprint.intersects(&artifact.footprint));
            assert!(t.footprint.x >= 0 && t.footprint.right() <= 12);
            assert!(t.footprint.y >= 0 && t.footprint.bottom() <= 12);
            assert!((40..=60).contains(&t.burial_depth));
        }
        for (i, a) in trash.iter().enumerate() {
            for b in &trash[i + 1..] {
                assert!(!a.footprint.intersects(&b.footprint));
            }
        }
    }

    #[test]
    fn impossible_placement_degrades_without_panic() {
        // Artifact covers the whole grid: nothing can fit.
        let artifact = Artifact {
            footprint: GridRect::new(0, 0, 12, 12),
            burial_depth: 50,
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let trash = place_trash(&artifact, 12, 12, 4, 3, 3, &tuning(), &mut rng);
        assert!(trash.is_empty());

        // Footprint larger than the grid.
        let trash = place_trash(&artifact, 12, 12, 2, 20, 20, &tuning(), &mut rng);
        assert!(trash.is_empty());
    }

    #[test]
    fn placement_is_deterministic_per_seed() {
        let artifact = Artifact {
            footprint: GridRect::new(10, 10, 8, 8),
            burial_depth: 50,
        };
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        let ta = place_trash(&artifact, 40, 70, 3, 4, 4, &tuning(), &mut a);
        let tb = place_trash(&artifact, 40, 70, 3, 4, 4, &tuning(), &mut b);
        assert_eq!(ta, tb);
    }
}
