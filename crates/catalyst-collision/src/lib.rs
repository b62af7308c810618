//! Axis-separated swept AABB movement through a tile grid.
//!
//! The resolver never touches the grid directly: callers hand it a solidity
//! sampler so the world edge policy stays with the world.
#![forbid(unsafe_code)]

pub mod body;
pub mod debug;
pub mod resolver;

pub use body::{Body, CollisionShape, KinematicBody};
pub use debug::CollisionDebug;
pub use resolver::{Resolution, move_and_slide};

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CollisionSettings {
    /// Gap left between a resolved edge and the blocking tile.
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
    /// Strip at the bottom of the collider ignored by horizontal checks.
    #[serde(default = "default_floor_clearance")]
    pub floor_clearance: f32,
    #[serde(default = "default_ground_friction")]
    pub ground_friction: f32,
    #[serde(default = "default_air_resistance")]
    pub air_resistance: f32,
    /// Horizontal speeds below this snap to zero.
    #[serde(default = "default_min_velocity")]
    pub min_velocity: f32,
    /// Displacements with both components under this are dropped.
    #[serde(default = "default_near_zero")]
    pub near_zero: f32,
}

fn default_epsilon() -> f32 {
    0.001
}
fn default_floor_clearance() -> f32 {
    0.5
}
fn default_ground_friction() -> f32 {
    0.8
}
fn default_air_resistance() -> f32 {
    0.5
}
fn default_min_velocity() -> f32 {
    0.1
}
fn default_near_zero() -> f32 {
    0.001
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            floor_clearance: default_floor_clearance(),
            ground_friction: default_ground_friction(),
            air_resistance: default_air_resistance(),
            min_velocity: default_min_velocity(),
            near_zero: default_near_zero(),
        }
    }
}
