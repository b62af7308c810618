use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use catalyst_collision::CollisionSettings;
use catalyst_lighting::LightingSettings;
use catalyst_world::WorldGenConfig;

/// Top-level TOML document. Every section is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CatalystConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub worldgen: WorldGenConfig,
    #[serde(default)]
    pub collision: CollisionSettings,
    #[serde(default)]
    pub lighting: LightingSettings,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldSection {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Tile definitions; the built-in set is used when absent.
    #[serde(default)]
    pub tiles: Option<PathBuf>,
}

fn default_width() -> i32 {
    400
}
fn default_height() -> i32 {
    300
}
fn default_seed() -> u64 {
    1337
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            seed: default_seed(),
            tiles: None,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<CatalystConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: CatalystConfig = toml::from_str(&s)?;
    Ok(cfg)
}
