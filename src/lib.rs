//! Catalyst: a tile-grid world with layered procedural generation, swept
//! AABB collision and scan + blur lighting.
#![forbid(unsafe_code)]

pub mod config;
pub mod world;

pub use config::{CatalystConfig, WorldSection, load_config_from_path};
pub use world::{SPAWN_CLEARANCE_TILES, World};

pub use catalyst_collision as collision;
pub use catalyst_geom as geom;
pub use catalyst_lighting as lighting;
pub use catalyst_tiles as tiles;
pub use catalyst_world as worldgen;
