use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use catalyst::collision::{Body, KinematicBody};
use catalyst::geom::{TILE_SIZE, TileRect, Vec2};
use catalyst::tiles::TileRegistry;
use catalyst::{CatalystConfig, World, load_config_from_path};
use clap::Parser;

const FRAME_DT: f32 = 1.0 / 60.0;
const GRAVITY: f32 = 0.35;
const WALK_SPEED: f32 = 1.5;

#[derive(Parser, Debug)]
#[command(name = "catalyst", about = "Generate, light and walk a tile world")]
struct Args {
    /// World seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
    /// TOML config with [world], [worldgen], [collision] and [lighting] sections
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Tile definitions TOML (defaults to the built-in set)
    #[arg(long)]
    tiles: Option<PathBuf>,
    /// Print a downsampled map after generation
    #[arg(long)]
    ascii: bool,
    /// Frames to simulate for a body dropped at the spawn point
    #[arg(long, default_value_t = 120)]
    frames: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => CatalystConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.world.seed = seed;
    }
    if let Some(w) = args.width {
        cfg.world.width = w;
    }
    if let Some(h) = args.height {
        cfg.world.height = h;
    }
    let reg = match args.tiles.or_else(|| cfg.world.tiles.clone()) {
        Some(path) => TileRegistry::load_from_path(&path)?,
        None => TileRegistry::builtin()?,
    };
    log::info!("loaded {} tile types", reg.len());

    let layers = cfg.worldgen.layer_table()?;
    let mut world = World::new(
        cfg.world.width,
        cfg.world.height,
        Arc::new(reg),
        layers,
        cfg.lighting.clone(),
        cfg.collision.clone(),
    );
    let stats = world.generate(cfg.world.seed, &cfg.worldgen)?;
    let written: usize = stats.iter().map(|s| s.written).sum();
    log::info!(
        "world {}x{} seed={} passes={} writes={}",
        world.width(),
        world.height(),
        cfg.world.seed,
        stats.len(),
        written
    );

    if args.ascii {
        print_ascii(&world);
    }
    simulate(&mut world, args.frames);
    Ok(())
}

/// Drops a body at the spawn point and walks it right, relighting around it.
///
/// Returns the first frame the body stood on the floor.
fn simulate(world: &mut World, frames: u32) -> Option<u32> {
    let spawn = world.spawning_pos_for_player();
    let mut body = KinematicBody::new(spawn, Vec2::new(TILE_SIZE * 1.5, TILE_SIZE * 2.75));
    log::info!("spawn at ({:.1}, {:.1})", spawn.x, spawn.y);

    let mut on_floor = false;
    let mut landed = None;
    for frame in 0..frames {
        body.vel.y += GRAVITY;
        if on_floor {
            body.vel.x = WALK_SPEED;
        }
        let res = world.move_and_slide(&mut body);
        on_floor = res.on_floor;
        if on_floor && landed.is_none() {
            landed = Some(frame);
            log::info!("landed on frame {} at ({:.1}, {:.1})", frame, body.pos.x, body.pos.y);
        }

        let center = body.position() + body.collider_size() / 2.0;
        let cell = World::world_to_grid(center);
        world.set_torch(Some(cell));
        let view = TileRect::centered(cell, 24);
        world.update_view_lighting(view, FRAME_DT);
        world.tick_debug(FRAME_DT);

        if frame % 30 == 0 {
            log::debug!(
                "frame {} pos=({:.1}, {:.1}) vel=({:.2}, {:.2}) floor={} light={:.2}",
                frame,
                body.pos.x,
                body.pos.y,
                body.vel.x,
                body.vel.y,
                res.on_floor,
                world.light_value_for_rendering_at(cell.x, cell.y)
            );
        }
    }
    log::info!(
        "after {} frames body at ({:.1}, {:.1}) on_floor={} hits={}",
        frames,
        body.pos.x,
        body.pos.y,
        on_floor,
        world.collision_debug().hit().count()
    );
    landed
}

fn print_ascii(world: &World) {
    let reg = world.registry();
    let step = (world.width() / 120).max(1);
    for y in (0..world.height()).step_by(step as usize) {
        let line: String = (0..world.width())
            .step_by(step as usize)
            .map(|x| {
                let tile = world.tile_at(x, y);
                if !tile.ty.is_empty() {
                    return reg.type_of(tile.ty).key.chars().next().unwrap_or('#');
                }
                if tile.wall.type_id().is_some() {
                    '.'
                } else if world.light_value_for_rendering_at(x, y) > 0.5 {
                    ' '
                } else {
                    '`'
                }
            })
            .collect();
        println!("{}", line);
    }
}
