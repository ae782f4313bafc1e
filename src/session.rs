//! Session bootstrap contract
//!
//! The server decides what is buried where; this module is the typed shape of
//! that decision. One [`SiteSpec`] arrives per play session (JSON, camelCase)
//! and the engine never fetches anything itself.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Visual theme of the site border decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    Grass,
    Rock,
    Sand,
    Swamp,
}

/// What the dirt is made of. The first material in the list drives the base
/// render color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirtMaterial {
    Soil,
    Clay,
    Gravel,
    Mud,
}

impl DirtMaterial {
    pub fn base_color(&self) -> [u8; 3] {
        match self {
            DirtMaterial::Soil => [0x8b, 0x73, 0x55],
            DirtMaterial::Clay => [0xa0, 0x82, 0x6d],
            DirtMaterial::Gravel => [0x9c, 0x9c, 0x9c],
            DirtMaterial::Mud => [0x6b, 0x5d, 0x4f],
        }
    }
}

/// A point in the canonical 100x100 placement space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPoint {
    pub x: f32,
    pub y: f32,
}

/// Artifact placement in canonical space, straight off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSpec {
    /// Top-left corner of the footprint.
    pub position: CanonicalPoint,
    /// Burial depth; clamped into the configured band on placement.
    pub depth: u8,
    pub width: f32,
    pub height: f32,
}

/// Everything the server supplies for one dig session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSpec {
    pub biome: Biome,
    pub dirt_materials: Vec<DirtMaterial>,
    /// Border color as `#RRGGBB`.
    pub border_color: String,
    pub artifact: ArtifactSpec,
    /// Decoy count; the tuning default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trash_count: Option<usize>,
    /// Placement/effect RNG seed; a fixed default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SiteSpec {
    /// Base material for dirt rendering (first listed, soil if none;
    /// the engine rejects empty lists before this matters).
    pub fn base_material(&self) -> DirtMaterial {
        self.dirt_materials.first().copied().unwrap_or(DirtMaterial::Soil)
    }

    /// Parse the border color string.
    pub fn border_rgb(&self) -> Result<[u8; 3], EngineError> {
        parse_hex_color(&self.border_color)
            .ok_or_else(|| EngineError::BadBorderColor(self.border_color.clone()))
    }
}

/// Parse `#RRGGBB` into RGB bytes.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_json() {
        let json = r##"{
            "biome": "swamp",
            "dirtMaterials": ["clay", "soil"],
            "borderColor": "#4A7023",
            "artifact": {
                "position": { "x": 50, "y": 50 },
                "depth": 50,
                "width": 25,
                "height": 15
            },
            "trashCount": 3
        }"##;
        let spec: SiteSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.biome, Biome::Swamp);
        assert_eq!(spec.base_material(), DirtMaterial::Clay);
        assert_eq!(spec.border_rgb().unwrap(), [0x4a, 0x70, 0x23]);
        assert_eq!(spec.trash_count, Some(3));
        assert_eq!(spec.seed, None);
        assert_eq!(spec.artifact.width, 25.0);
    }

    #[test]
    fn rejects_bad_border_colors() {
        assert!(parse_hex_color("#12345").is_none());
        assert!(parse_hex_color("123456").is_none());
        assert!(parse_hex_color("#zzzzzz").is_none());
        assert_eq!(parse_hex_color("#FFD700"), Some([0xff, 0xd7, 0x00]));
    }

    #[test]
    fn spec_round_trips() {
        let spec = SiteSpec {
            biome: Biome::Grass,
            dirt_materials: vec![DirtMaterial::Mud],
            border_color: "#228B22".into(),
            artifact: ArtifactSpec {
                position: CanonicalPoint { x: 30.0, y: 40.0 },
                depth: 45,
                width: 20.0,
                height: 20.0,
            },
            trash_count: None,
            seed: Some(7),
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("dirtMaterials"));
        assert!(!json.contains("trashCount"));
        let back: SiteSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(7));
        assert_eq!(back.artifact.depth, 45);
    }
}
