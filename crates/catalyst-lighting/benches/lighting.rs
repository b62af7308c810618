use criterion::{Criterion, black_box, criterion_group, criterion_main};

use catalyst_geom::GridPos;
use catalyst_lighting::{LightingEngine, LightingSettings};
use catalyst_tiles::TileRegistry;
use catalyst_world::{TileGrid, WorldGenConfig, WorldGenerator};

fn generated_world(w: i32, h: i32) -> (TileGrid, TileRegistry, LightingEngine) {
    let reg = TileRegistry::builtin().unwrap();
    let cfg = WorldGenConfig::default();
    let layers = cfg.layer_table().unwrap();
    let mut grid = TileGrid::new(w, h);
    WorldGenerator::new(0xC0FFEE, &cfg, &layers, &reg, w, h)
        .unwrap()
        .generate(&mut grid, &reg);
    let engine = LightingEngine::new(w, h, &layers, LightingSettings::default());
    (grid, reg, engine)
}

fn bench_full_world(c: &mut Criterion) {
    let mut group = c.benchmark_group("lighting_full");
    let (mut grid, reg, mut engine) = generated_world(400, 300);
    group.bench_function("full_400x300", |b| {
        b.iter(|| {
            engine.update_all(&mut grid, &reg);
            black_box(grid.light(200, 150));
        })
    });
    group.finish();
}

fn bench_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lighting_edit");
    let (mut grid, reg, mut engine) = generated_world(400, 300);
    engine.update_all(&mut grid, &reg);
    group.bench_function("padded_edit", |b| {
        b.iter(|| {
            let area = engine.update_around(&mut grid, &reg, GridPos::new(200, 120));
            black_box(area);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_full_world, bench_edit);
criterion_main!(benches);
