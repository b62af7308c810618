use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TilesConfig {
    #[serde(default)]
    pub tiles: Vec<TileDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TileDef {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_max_health")]
    pub max_health: u32,
    #[serde(default = "default_solid")]
    pub solid: bool,
    #[serde(default)]
    pub glow: f32,
    #[serde(default = "default_map_color")]
    pub map_color: [u8; 4],
    #[serde(default)]
    pub sprites: Vec<String>,
}

fn default_max_health() -> u32 {
    100
}
fn default_solid() -> bool {
    true
}
fn default_map_color() -> [u8; 4] {
    [255, 0, 255, 255]
}
