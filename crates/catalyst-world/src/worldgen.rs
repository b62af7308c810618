use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::error::GenError;
use crate::layers::{
    CAVERN, LayerDef, LayerTable, SPACE, SURFACE, UNDERGROUND, UNDERWORLD, standard_layer_defs,
};
use crate::noise::NoiseConfig;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldGenConfig {
    #[serde(default = "standard_layer_defs")]
    pub layers: Vec<LayerDef>,
    #[serde(default)]
    pub boundary: Boundary,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default = "default_patches")]
    pub patches: Vec<PatchGroup>,
    #[serde(default)]
    pub small_caves: SmallCaves,
    #[serde(default)]
    pub caves: Caves,
    #[serde(default)]
    pub long_caves: LongCaves,
    #[serde(default)]
    pub bedrock: Bedrock,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            layers: standard_layer_defs(),
            boundary: Boundary::default(),
            terrain: Terrain::default(),
            patches: default_patches(),
            small_caves: SmallCaves::default(),
            caves: Caves::default(),
            long_caves: LongCaves::default(),
            bedrock: Bedrock::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn layer_table(&self) -> Result<LayerTable, GenError> {
        LayerTable::from_ends(&self.layers)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldGenConfig = toml::from_str(&s)?;
    Ok(cfg)
}

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/// Defaults for layer-edge perturbation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Boundary {
    #[serde(default = "default_boundary_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_boundary_frequency")]
    pub frequency: f32,
}
fn default_boundary_amplitude() -> f32 {
    0.01
}
fn default_boundary_frequency() -> f32 {
    0.02
}
impl Default for Boundary {
    fn default() -> Self {
        Self {
            amplitude: default_boundary_amplitude(),
            frequency: default_boundary_frequency(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Terrain {
    #[serde(default = "default_terrain_noise")]
    pub noise: NoiseConfig,
    #[serde(default = "default_terrain_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_terrain_top")]
    pub top: String,
    #[serde(default = "default_terrain_fill")]
    pub fill: String,
}
fn default_terrain_noise() -> NoiseConfig {
    NoiseConfig::plain(0.05)
}
fn default_terrain_amplitude() -> f32 {
    5.0
}
fn default_terrain_top() -> String {
    "GRASS".into()
}
fn default_terrain_fill() -> String {
    "DIRT".into()
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            noise: default_terrain_noise(),
            amplitude: default_terrain_amplitude(),
            top: default_terrain_top(),
            fill: default_terrain_fill(),
        }
    }
}

/// One ore/clay type placed into several layers with per-layer thresholds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PatchGroup {
    pub tile: String,
    pub noise: NoiseConfig,
    #[serde(default = "default_patch_replace")]
    pub replace: Vec<String>,
    #[serde(default = "default_patch_boundary")]
    pub boundary_amplitude: f32,
    pub layers: Vec<PatchLayer>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PatchLayer {
    pub layer: String,
    pub threshold: f32,
}

fn default_patch_replace() -> Vec<String> {
    names(&["DIRT", "STONE"])
}
fn default_patch_boundary() -> f32 {
    0.005
}

fn default_patches() -> Vec<PatchGroup> {
    let layer = |name: &str, threshold: f32| PatchLayer {
        layer: name.to_string(),
        threshold,
    };
    vec![
        PatchGroup {
            tile: "STONE".into(),
            noise: NoiseConfig::fbm(0.035, 3, 2.0, 0.5, 0.0),
            replace: default_patch_replace(),
            boundary_amplitude: default_patch_boundary(),
            layers: vec![
                layer(SURFACE, 0.4),
                layer(UNDERGROUND, 0.0),
                layer(CAVERN, -0.4),
            ],
        },
        PatchGroup {
            tile: "RED_CLAY".into(),
            noise: NoiseConfig::fbm(0.02, 3, 2.0, 0.5, 0.0),
            replace: default_patch_replace(),
            boundary_amplitude: default_patch_boundary(),
            layers: vec![
                layer(SURFACE, 0.7),
                layer(UNDERGROUND, 0.7),
                layer(CAVERN, 0.7),
            ],
        },
    ]
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SmallCaves {
    #[serde(default = "default_small_caves_noise")]
    pub noise: NoiseConfig,
    #[serde(default = "default_small_caves_threshold")]
    pub threshold: f32,
    #[serde(default = "default_small_caves_blocked")]
    pub blocked_layers: Vec<String>,
}
fn default_small_caves_noise() -> NoiseConfig {
    NoiseConfig::fbm(0.015, 6, 1.4, 0.91, -0.43)
}
fn default_small_caves_threshold() -> f32 {
    0.5
}
fn default_small_caves_blocked() -> Vec<String> {
    names(&[SPACE])
}
impl Default for SmallCaves {
    fn default() -> Self {
        Self {
            noise: default_small_caves_noise(),
            threshold: default_small_caves_threshold(),
            blocked_layers: default_small_caves_blocked(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Caves {
    #[serde(default = "default_caves_noise")]
    pub noise: NoiseConfig,
    #[serde(default = "default_caves_base_threshold")]
    pub base_threshold: f32,
    #[serde(default = "default_caves_mask_bonus")]
    pub mask_bonus: f32,
    #[serde(default = "default_caves_wall")]
    pub wall: String,
    #[serde(default = "default_caves_blocked")]
    pub blocked_layers: Vec<String>,
    #[serde(default = "default_caves_feather")]
    pub feather_rows: u32,
}
fn default_caves_noise() -> NoiseConfig {
    NoiseConfig::fbm(0.01, 6, 1.27, 1.1, -0.5)
}
fn default_caves_base_threshold() -> f32 {
    -0.7
}
fn default_caves_mask_bonus() -> f32 {
    0.2
}
fn default_caves_wall() -> String {
    "DIRT".into()
}
fn default_caves_blocked() -> Vec<String> {
    names(&[SPACE, SURFACE])
}
fn default_caves_feather() -> u32 {
    24
}
impl Default for Caves {
    fn default() -> Self {
        Self {
            noise: default_caves_noise(),
            base_threshold: default_caves_base_threshold(),
            mask_bonus: default_caves_mask_bonus(),
            wall: default_caves_wall(),
            blocked_layers: default_caves_blocked(),
            feather_rows: default_caves_feather(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LongCaves {
    #[serde(default = "default_tunnel_noise")]
    pub tunnel: NoiseConfig,
    #[serde(default = "default_warp_noise")]
    pub warp: NoiseConfig,
    #[serde(default = "default_warp_strength")]
    pub warp_strength: f32,
    #[serde(default = "default_stretch_y")]
    pub stretch_y: f32,
    #[serde(default = "default_long_caves_threshold")]
    pub threshold: f32,
    #[serde(default = "default_long_caves_layers")]
    pub layers: Vec<String>,
}
fn default_tunnel_noise() -> NoiseConfig {
    NoiseConfig::fbm(0.0025, 3, 2.0, 0.5, 0.0)
}
fn default_warp_noise() -> NoiseConfig {
    NoiseConfig::plain(0.04)
}
fn default_warp_strength() -> f32 {
    15.0
}
fn default_stretch_y() -> f32 {
    3.0
}
fn default_long_caves_threshold() -> f32 {
    0.15
}
fn default_long_caves_layers() -> Vec<String> {
    names(&[CAVERN, UNDERWORLD])
}
impl Default for LongCaves {
    fn default() -> Self {
        Self {
            tunnel: default_tunnel_noise(),
            warp: default_warp_noise(),
            warp_strength: default_warp_strength(),
            stretch_y: default_stretch_y(),
            threshold: default_long_caves_threshold(),
            layers: default_long_caves_layers(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Bedrock {
    #[serde(default = "default_bedrock_tile")]
    pub tile: String,
    #[serde(default = "default_bedrock_layers")]
    pub layers: Vec<String>,
    #[serde(default = "default_bedrock_start_amplitude")]
    pub start_amplitude: f32,
    #[serde(default)]
    pub end_amplitude: f32,
}
fn default_bedrock_tile() -> String {
    "SLATE".into()
}
fn default_bedrock_layers() -> Vec<String> {
    names(&[UNDERWORLD])
}
fn default_bedrock_start_amplitude() -> f32 {
    0.0025
}
impl Default for Bedrock {
    fn default() -> Self {
        Self {
            tile: default_bedrock_tile(),
            layers: default_bedrock_layers(),
            start_amplitude: default_bedrock_start_amplitude(),
            end_amplitude: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: WorldGenConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, WorldGenConfig::default());
        assert_eq!(cfg.patches.len(), 2);
        assert_eq!(cfg.caves.base_threshold, -0.7);
        assert_eq!(cfg.small_caves.noise.fractal.as_ref().unwrap().octaves, 6);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: WorldGenConfig = toml::from_str(
            r#"
            [terrain]
            amplitude = 9.0

            [long_caves]
            threshold = 0.2
        "#,
        )
        .unwrap();
        assert_eq!(cfg.terrain.amplitude, 9.0);
        assert_eq!(cfg.terrain.noise.frequency, 0.05);
        assert_eq!(cfg.long_caves.threshold, 0.2);
        assert_eq!(cfg.long_caves.warp_strength, 15.0);
        assert!(cfg.layer_table().is_ok());
    }
}
