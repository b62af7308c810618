//! Tile types, tile values, and the interned tile-type registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{RegistryError, TileRegistry};
pub use types::{Tile, TileType, TileTypeId, Wall};
