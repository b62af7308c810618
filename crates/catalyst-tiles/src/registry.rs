use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use hashbrown::HashMap;

use super::config::{TileDef, TilesConfig};
use super::types::{TileType, TileTypeId, Wall};

pub const EMPTY_KEY: &str = "EMPTY";

const BUILTIN_TILES: &str = include_str!("../assets/tiles.toml");

#[derive(Clone, Debug, PartialEq)]
pub enum RegistryError {
    EmptyKey,
    DuplicateKey(String),
    UnknownKey(String),
    InvalidGlow { key: String, glow: f32 },
    Full,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyKey => write!(f, "tile type key must not be empty"),
            RegistryError::DuplicateKey(k) => write!(f, "tile type '{}' registered twice", k),
            RegistryError::UnknownKey(k) => write!(f, "unknown tile type '{}'", k),
            RegistryError::InvalidGlow { key, glow } => {
                write!(f, "tile type '{}' has invalid glow {}", key, glow)
            }
            RegistryError::Full => write!(f, "tile registry is full"),
        }
    }
}

impl Error for RegistryError {}

/// Interned tile types. `EMPTY` is always id 0.
#[derive(Clone, Debug)]
pub struct TileRegistry {
    types: Vec<TileType>,
    by_key: HashMap<String, TileTypeId>,
    max_glow: f32,
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TileRegistry {
    pub fn new() -> Self {
        let empty = TileType {
            id: TileTypeId::EMPTY,
            key: EMPTY_KEY.to_string(),
            name: "Empty".to_string(),
            description: "Just air".to_string(),
            max_health: 0,
            solid: false,
            glow: 0.0,
            map_color: [0, 0, 0, 0],
            sprite_variants: vec!["empty".to_string()],
        };
        let mut by_key = HashMap::new();
        by_key.insert(empty.key.clone(), TileTypeId::EMPTY);
        Self {
            types: vec![empty],
            by_key,
            max_glow: 0.0,
        }
    }

    /// Registry holding the bundled tile set.
    pub fn builtin() -> Result<Self, Box<dyn Error>> {
        Self::from_toml_str(BUILTIN_TILES)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: TilesConfig = toml::from_str(toml_str)?;
        Ok(Self::from_config(cfg)?)
    }

    pub fn from_config(cfg: TilesConfig) -> Result<Self, RegistryError> {
        let mut reg = TileRegistry::new();
        for def in cfg.tiles {
            reg.register(def)?;
        }
        log::debug!("tile registry: {} types, max glow {:.2}", reg.len(), reg.max_glow);
        Ok(reg)
    }

    pub fn register(&mut self, def: TileDef) -> Result<TileTypeId, RegistryError> {
        if def.key.is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        if self.by_key.contains_key(&def.key) {
            return Err(RegistryError::DuplicateKey(def.key));
        }
        if !def.glow.is_finite() || def.glow < 0.0 {
            return Err(RegistryError::InvalidGlow {
                key: def.key,
                glow: def.glow,
            });
        }
        let idx = u16::try_from(self.types.len()).map_err(|_| RegistryError::Full)?;
        let id = TileTypeId(idx);
        let name = def.name.unwrap_or_else(|| def.key.clone());
        self.max_glow = self.max_glow.max(def.glow);
        self.by_key.insert(def.key.clone(), id);
        self.types.push(TileType {
            id,
            key: def.key,
            name,
            description: def.description,
            max_health: def.max_health,
            solid: def.solid,
            glow: def.glow,
            map_color: def.map_color,
            sprite_variants: def.sprites,
        });
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: TileTypeId) -> Option<&TileType> {
        self.types.get(id.index())
    }

    pub fn id_by_key(&self, key: &str) -> Option<TileTypeId> {
        self.by_key.get(key).copied()
    }

    pub fn lookup(&self, key: &str) -> Result<TileTypeId, RegistryError> {
        self.id_by_key(key)
            .ok_or_else(|| RegistryError::UnknownKey(key.to_string()))
    }

    /// Fail-fast lookup for keys that must exist.
    pub fn require(&self, key: &str) -> TileTypeId {
        match self.id_by_key(key) {
            Some(id) => id,
            None => panic!("unknown tile type '{}'", key),
        }
    }

    /// Descriptor for `id`; panics on an id this registry never handed out.
    pub fn type_of(&self, id: TileTypeId) -> &TileType {
        match self.types.get(id.index()) {
            Some(t) => t,
            None => panic!("unknown tile type id {}", id.0),
        }
    }

    #[inline]
    pub fn is_solid(&self, id: TileTypeId) -> bool {
        self.types.get(id.index()).is_some_and(|t| t.solid)
    }

    #[inline]
    pub fn glow(&self, id: TileTypeId) -> f32 {
        self.types.get(id.index()).map_or(0.0, |t| t.glow)
    }

    #[inline]
    pub fn is_wall_solid(&self, wall: Wall) -> bool {
        wall.type_id().is_some_and(|id| self.is_solid(id))
    }

    /// Brightest intrinsic glow of any registered type.
    #[inline]
    pub fn max_glow(&self) -> f32 {
        self.max_glow
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileType> {
        self.types.iter()
    }
}
