use std::time::Instant;

use catalyst_tiles::{TileRegistry, TileTypeId};

use crate::error::GenError;
use crate::grid::TileStore;
use crate::layers::LayerTable;
use crate::mask::{BoundaryNoise, LayerMask, LayerMaskOptions, MaskMode};
use crate::pass::{Pass, PassKind, PassStats};
use crate::rng::WorldGenRng;
use crate::worldgen::WorldGenConfig;

/// Ordered pass list built from one seed.
pub struct WorldGenerator {
    seed: u64,
    width: i32,
    height: i32,
    passes: Vec<Pass>,
}

fn resolve_all(reg: &TileRegistry, keys: &[String]) -> Result<Vec<TileTypeId>, GenError> {
    keys.iter()
        .map(|k| reg.lookup(k).map_err(GenError::from))
        .collect()
}

impl WorldGenerator {
    /// Resolves every tile key up front so a bad config fails before any cell is touched.
    pub fn new(
        seed: u64,
        cfg: &WorldGenConfig,
        layers: &LayerTable,
        reg: &TileRegistry,
        width: i32,
        height: i32,
    ) -> Result<Self, GenError> {
        if width <= 0 || height <= 0 {
            return Err(GenError::EmptyWorld);
        }
        let mut rng = WorldGenRng::new(seed);
        let mut passes = Vec::new();
        let (w, h) = (width, height);
        let boundary = |seed: i32| {
            let mut b = BoundaryNoise::new(seed);
            b.frequency = cfg.boundary.frequency;
            b.with_amplitudes(cfg.boundary.amplitude, cfg.boundary.amplitude)
        };

        // Terrain
        let top = reg.lookup(&cfg.terrain.top)?;
        let fill = reg.lookup(&cfg.terrain.fill)?;
        let terrain_noise = rng.noise(&cfg.terrain.noise);
        let baseline = layers.surface_baseline(height);
        let surface_rows = (0..width)
            .map(|x| (baseline + terrain_noise.get_noise_2d(x as f32, 0.0) * cfg.terrain.amplitude) as i32)
            .collect();
        passes.push(Pass::new(
            "initial terrain",
            w,
            h,
            PassKind::InitialTerrain {
                surface_rows,
                top,
                fill,
            },
            rng.randomizer(),
        ));

        // Ore and clay patches, one independently seeded pass per layer.
        for group in &cfg.patches {
            let ore = reg.lookup(&group.tile)?;
            let replace = resolve_all(reg, &group.replace)?;
            for pl in &group.layers {
                let noise = rng.noise(&group.noise);
                let mask = LayerMask::with_options(
                    w,
                    h,
                    layers,
                    &[pl.layer.as_str()],
                    MaskMode::Allow,
                    LayerMaskOptions {
                        boundary: Some(
                            boundary(rng.next_seed())
                                .with_amplitudes(group.boundary_amplitude, group.boundary_amplitude),
                        ),
                        feather_rows: None,
                    },
                );
                passes.push(
                    Pass::new(
                        format!("{} patches ({})", group.tile, pl.layer),
                        w,
                        h,
                        PassKind::Patches {
                            noise,
                            threshold: pl.threshold,
                            ore,
                            replace: replace.clone(),
                        },
                        rng.randomizer(),
                    )
                    .with_mask(mask),
                );
            }
        }

        // Small caves
        let sc = &cfg.small_caves;
        let noise = rng.noise(&sc.noise);
        let mask = LayerMask::with_options(
            w,
            h,
            layers,
            sc.blocked_layers.as_slice(),
            MaskMode::Block,
            LayerMaskOptions {
                boundary: Some(boundary(rng.next_seed())),
                feather_rows: None,
            },
        );
        passes.push(
            Pass::new(
                "small caves",
                w,
                h,
                PassKind::SmallCaves {
                    noise,
                    threshold: sc.threshold,
                },
                rng.randomizer(),
            )
            .with_mask(mask),
        );

        // Caves
        let cc = &cfg.caves;
        let wall = reg.lookup(&cc.wall)?;
        let noise = rng.noise(&cc.noise);
        let mask = LayerMask::with_options(
            w,
            h,
            layers,
            cc.blocked_layers.as_slice(),
            MaskMode::Block,
            LayerMaskOptions {
                boundary: Some(boundary(rng.next_seed())),
                feather_rows: Some(cc.feather_rows),
            },
        );
        passes.push(
            Pass::new(
                "caves",
                w,
                h,
                PassKind::Caves {
                    noise,
                    base_threshold: cc.base_threshold,
                    mask_bonus: cc.mask_bonus,
                    wall,
                },
                rng.randomizer(),
            )
            .with_mask(mask),
        );

        // Long caves
        let lc = &cfg.long_caves;
        let tunnel = rng.noise(&lc.tunnel);
        let warp_x = rng.noise(&lc.warp);
        let warp_y = rng.noise(&lc.warp);
        let mask = LayerMask::with_options(
            w,
            h,
            layers,
            lc.layers.as_slice(),
            MaskMode::Allow,
            LayerMaskOptions {
                boundary: Some(boundary(rng.next_seed())),
                feather_rows: None,
            },
        );
        passes.push(
            Pass::new(
                "long caves",
                w,
                h,
                PassKind::LongCaves {
                    tunnel,
                    warp_x,
                    warp_y,
                    warp_strength: lc.warp_strength,
                    stretch_y: lc.stretch_y,
                    threshold: lc.threshold,
                },
                rng.randomizer(),
            )
            .with_mask(mask),
        );

        // Bedrock
        let br = &cfg.bedrock;
        let tile = reg.lookup(&br.tile)?;
        let mask = LayerMask::with_options(
            w,
            h,
            layers,
            br.layers.as_slice(),
            MaskMode::Allow,
            LayerMaskOptions {
                boundary: Some(boundary(rng.next_seed()).with_amplitudes(br.start_amplitude, br.end_amplitude)),
                feather_rows: None,
            },
        );
        passes.push(
            Pass::new("bedrock", w, h, PassKind::Bedrock { tile }, rng.randomizer()).with_mask(mask),
        );

        Ok(Self {
            seed,
            width,
            height,
            passes,
        })
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Runs every pass in order against `store`.
    pub fn generate<S: TileStore + ?Sized>(&mut self, store: &mut S, reg: &TileRegistry) -> Vec<PassStats> {
        let t0 = Instant::now();
        if store.width() != self.width || store.height() != self.height {
            log::warn!(
                target: "worldgen",
                "generator sized {}x{} applied to {}x{} store",
                self.width,
                self.height,
                store.width(),
                store.height()
            );
        }
        let stats: Vec<PassStats> = self.passes.iter_mut().map(|p| p.apply(store, reg)).collect();
        let written: usize = stats.iter().map(|s| s.written).sum();
        log::info!(
            target: "worldgen",
            "generated {}x{} seed={} passes={} writes={} in {:.1}ms",
            self.width,
            self.height,
            self.seed,
            self.passes.len(),
            written,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        stats
    }
}
