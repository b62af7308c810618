use std::sync::Arc;
use std::time::Instant;

use catalyst_collision::{Body, CollisionDebug, CollisionSettings, Resolution, move_and_slide};
use catalyst_geom::{GridPos, TileRect, Vec2};
use catalyst_lighting::{LightingEngine, LightingSettings};
use catalyst_tiles::{Tile, TileRegistry, TileTypeId, Wall};
use catalyst_world::{GenError, LayerTable, PassStats, TileGrid, TileStore, WorldGenConfig, WorldGenerator};

/// Rows left above the ground when placing the player.
pub const SPAWN_CLEARANCE_TILES: i32 = 5;

/// Owns the grid and wires generation, edits, lighting and collision together.
pub struct World {
    grid: TileGrid,
    reg: Arc<TileRegistry>,
    layers: LayerTable,
    lighting: LightingEngine,
    collision: CollisionSettings,
    debug: CollisionDebug,
    generating: bool,
}

impl World {
    pub fn new(
        width: i32,
        height: i32,
        reg: Arc<TileRegistry>,
        layers: LayerTable,
        lighting: LightingSettings,
        collision: CollisionSettings,
    ) -> Self {
        let grid = TileGrid::new(width, height);
        let lighting = LightingEngine::new(grid.width(), grid.height(), &layers, lighting);
        Self {
            grid,
            reg,
            layers,
            lighting,
            collision,
            debug: CollisionDebug::default(),
            generating: false,
        }
    }

    /// Runs every generation pass, then lights the whole world once.
    ///
    /// Edits made by the passes skip incremental lighting. `cfg.layers` must
    /// describe the same table the world was built with.
    pub fn generate(&mut self, seed: u64, cfg: &WorldGenConfig) -> Result<Vec<PassStats>, GenError> {
        if cfg.layer_table()? != self.layers {
            return Err(GenError::InvalidLayers(
                "worldgen layers differ from the world's layer table".into(),
            ));
        }
        let reg = Arc::clone(&self.reg);
        let mut generator = WorldGenerator::new(seed, cfg, &self.layers, &reg, self.width(), self.height())?;
        self.generating = true;
        let stats = generator.generate(self, &reg);
        self.generating = false;

        let t0 = Instant::now();
        self.lighting.update_all(&mut self.grid, &reg);
        log::info!(
            target: "lighting",
            "initial lighting {}x{} in {:.1}ms",
            self.width(),
            self.height(),
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(stats)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    #[inline]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    #[inline]
    pub fn registry(&self) -> &Arc<TileRegistry> {
        &self.reg
    }

    #[inline]
    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }

    #[inline]
    pub fn lighting(&self) -> &LightingEngine {
        &self.lighting
    }

    #[inline]
    pub fn collision_settings(&self) -> &CollisionSettings {
        &self.collision
    }

    #[inline]
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y)
    }

    #[inline]
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.grid.get(x, y)
    }

    #[inline]
    pub fn tile_type_at(&self, x: i32, y: i32) -> TileTypeId {
        self.grid.tile_type(x, y)
    }

    /// Out-of-bounds cells count as solid.
    #[inline]
    pub fn is_position_solid(&self, x: i32, y: i32) -> bool {
        self.grid.is_solid_at(&self.reg, x, y)
    }

    #[inline]
    pub fn light_value_at(&self, x: i32, y: i32) -> f32 {
        self.grid.light(x, y)
    }

    #[inline]
    pub fn light_value_for_rendering_at(&self, x: i32, y: i32) -> f32 {
        self.grid.light(x, y).clamp(0.0, 1.0)
    }

    /// Writes a cell and relights around it unless generation is running.
    pub fn set_tile_at(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        if !self.grid.set(x, y, tile) {
            return false;
        }
        if !self.generating {
            self.lighting
                .update_around(&mut self.grid, &self.reg, GridPos::new(x, y));
        }
        true
    }

    /// Places `ty` with an optional wall behind it.
    ///
    /// Panics if either id is not registered.
    pub fn set_tile_type_at(&mut self, x: i32, y: i32, ty: TileTypeId, wall: Option<TileTypeId>) -> bool {
        assert!(self.reg.get(ty).is_some(), "unknown tile type id {}", ty.0);
        if let Some(w) = wall {
            assert!(self.reg.get(w).is_some(), "unknown tile type id {}", w.0);
        }
        self.set_tile_at(x, y, Tile::new(ty, Wall::from(wall), 0))
    }

    #[inline]
    pub fn world_to_grid(pos: Vec2) -> GridPos {
        TileGrid::world_to_grid(pos)
    }

    #[inline]
    pub fn grid_to_world(cell: GridPos) -> Vec2 {
        TileGrid::grid_to_world(cell)
    }

    /// World position a few tiles above the first solid ground found walking
    /// outward from the middle column.
    pub fn spawning_pos_for_player(&self) -> Vec2 {
        let w = self.width();
        let center = w / 2;
        for i in 0..w {
            // center, +1, -1, +2, -2, ...
            let offset = if i % 2 == 1 { (i + 1) / 2 } else { -(i / 2) };
            let x = center + offset;
            if x < 0 || x >= w {
                continue;
            }
            if let Some(row) = self.grid.first_solid_row(&self.reg, x) {
                let y = (row - SPAWN_CLEARANCE_TILES).max(0);
                return Self::grid_to_world(GridPos::new(x, y));
            }
        }
        Self::grid_to_world(GridPos::new(center, 0))
    }

    /// Moves the point light. Applies on the next lighting update.
    pub fn set_torch(&mut self, cell: Option<GridPos>) {
        self.lighting.set_torch(cell);
    }

    /// Periodic relight of the visible rectangle. Returns whether it ran.
    pub fn update_view_lighting(&mut self, view: TileRect, dt: f32) -> bool {
        self.lighting
            .update_view(&mut self.grid, &self.reg, view, dt)
    }

    pub fn move_and_slide<B: Body + ?Sized>(&mut self, body: &mut B) -> Resolution {
        let grid = &self.grid;
        let reg = &*self.reg;
        let is_solid = |x: i32, y: i32| grid.is_solid_at(reg, x, y);
        move_and_slide(body, &self.collision, &is_solid, Some(&mut self.debug))
    }

    #[inline]
    pub fn collision_debug(&self) -> &CollisionDebug {
        &self.debug
    }

    pub fn tick_debug(&mut self, dt: f32) -> bool {
        self.debug.tick(dt)
    }
}

impl TileStore for World {
    fn width(&self) -> i32 {
        self.grid.width()
    }

    fn height(&self) -> i32 {
        self.grid.height()
    }

    fn tile(&self, x: i32, y: i32) -> Tile {
        self.grid.get(x, y)
    }

    fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        self.set_tile_at(x, y, tile)
    }
}
