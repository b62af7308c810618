use std::sync::Arc;

use catalyst::World;
use catalyst::collision::CollisionSettings;
use catalyst::geom::GridPos;
use catalyst::lighting::LightingSettings;
use catalyst::tiles::TileRegistry;
use catalyst::worldgen::LayerTable;
use proptest::prelude::*;

fn empty_world() -> World {
    World::new(
        64,
        48,
        Arc::new(TileRegistry::builtin().unwrap()),
        LayerTable::standard(),
        LightingSettings::default(),
        CollisionSettings::default(),
    )
}

proptest! {
    #[test]
    fn cell_origin_maps_back_to_its_cell(x in -1000i32..1000, y in -1000i32..1000) {
        let cell = GridPos::new(x, y);
        prop_assert_eq!(World::world_to_grid(World::grid_to_world(cell)), cell);
    }

    #[test]
    fn empty_world_is_solid_only_outside(x in -20i32..84, y in -20i32..68) {
        let world = empty_world();
        prop_assert_eq!(world.is_position_solid(x, y), !world.is_within_bounds(x, y));
        prop_assert_eq!(world.light_value_at(x, y), 0.0);
    }
}
