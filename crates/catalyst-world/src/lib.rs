//! Tile grid, vertical layers, pass masks, and the seeded generation pipeline.
#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod grid;
pub mod layers;
pub mod mask;
pub mod noise;
pub mod pass;
pub mod rng;
pub mod worldgen;

pub use error::GenError;
pub use generator::WorldGenerator;
pub use grid::{TileGrid, TileStore};
pub use layers::{Layer, LayerTable};
pub use mask::{BoundaryNoise, DefaultMask, LayerMask, LayerMaskOptions, MaskMode, MaskStack, PassMask};
pub use pass::{Pass, PassKind, PassStats};
pub use rng::WorldGenRng;
pub use worldgen::WorldGenConfig;
