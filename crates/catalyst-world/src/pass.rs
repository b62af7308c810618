use std::time::Instant;

use catalyst_tiles::{Tile, TileRegistry, TileTypeId, Wall};
use fastnoise_lite::FastNoiseLite;
use rand_chacha::ChaCha8Rng;

use crate::grid::TileStore;
use crate::mask::{MaskStack, PassMask};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub visited: usize,
    pub written: usize,
}

/// What a pass does to an allowed cell.
pub enum PassKind {
    /// Per-column surface row from 1D noise; solid below, air above.
    InitialTerrain {
        surface_rows: Vec<i32>,
        top: TileTypeId,
        fill: TileTypeId,
    },
    /// Replaces `replace` types with `ore` where noise exceeds `threshold`.
    Patches {
        noise: FastNoiseLite,
        threshold: f32,
        ore: TileTypeId,
        replace: Vec<TileTypeId>,
    },
    /// Carves where noise is above `threshold`; a solid foreground stays on as the wall.
    SmallCaves { noise: FastNoiseLite, threshold: f32 },
    /// Carves where noise is at or below `base_threshold + mask * mask_bonus`, leaving `wall`.
    Caves {
        noise: FastNoiseLite,
        base_threshold: f32,
        mask_bonus: f32,
        wall: TileTypeId,
    },
    /// Domain-warped tunnels: carves where `|n| < threshold`.
    LongCaves {
        tunnel: FastNoiseLite,
        warp_x: FastNoiseLite,
        warp_y: FastNoiseLite,
        warp_strength: f32,
        stretch_y: f32,
        threshold: f32,
    },
    /// Unconditional fill with the hardest solid type.
    Bedrock { tile: TileTypeId },
}

/// One masked rewrite sweep over the grid.
pub struct Pass {
    name: String,
    masks: MaskStack,
    kind: PassKind,
    rng: ChaCha8Rng,
}

impl Pass {
    pub fn new(name: impl Into<String>, width: i32, height: i32, kind: PassKind, rng: ChaCha8Rng) -> Self {
        Self {
            name: name.into(),
            masks: MaskStack::new(width, height),
            kind,
            rng,
        }
    }

    pub fn with_mask(mut self, mask: impl Into<PassMask>) -> Self {
        self.masks.push(mask);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn masks(&self) -> &MaskStack {
        &self.masks
    }

    pub fn kind(&self) -> &PassKind {
        &self.kind
    }

    /// New content for `(x, y)`, or `None` to leave the cell alone.
    pub fn transform(
        &mut self,
        reg: &TileRegistry,
        current: Tile,
        x: i32,
        y: i32,
        mask: f32,
    ) -> Option<Tile> {
        let (xf, yf) = (x as f32, y as f32);
        match &self.kind {
            PassKind::InitialTerrain {
                surface_rows,
                top,
                fill,
            } => {
                let surface = surface_rows.get(x as usize).copied()?;
                if y > surface {
                    let ty = if y == surface + 1 { *top } else { *fill };
                    Some(Tile::new(ty, Wall::None, variant(reg, ty, &mut self.rng)))
                } else {
                    Some(Tile::EMPTY)
                }
            }
            PassKind::Patches {
                noise,
                threshold,
                ore,
                replace,
            } => {
                if !replace.contains(&current.ty) {
                    return None;
                }
                if noise.get_noise_2d(xf, yf) <= *threshold {
                    return None;
                }
                let ore = *ore;
                Some(Tile::new(ore, current.wall, variant(reg, ore, &mut self.rng)))
            }
            PassKind::SmallCaves { noise, threshold } => {
                (noise.get_noise_2d(xf, yf) > *threshold).then(|| carved(backing(reg, current)))
            }
            PassKind::Caves {
                noise,
                base_threshold,
                mask_bonus,
                wall,
            } => {
                let threshold = base_threshold + mask * mask_bonus;
                (noise.get_noise_2d(xf, yf) <= threshold).then(|| carved(Wall::Tile(*wall)))
            }
            PassKind::LongCaves {
                tunnel,
                warp_x,
                warp_y,
                warp_strength,
                stretch_y,
                threshold,
            } => {
                let wx = xf + warp_x.get_noise_2d(xf, yf) * warp_strength;
                let wy = yf + warp_y.get_noise_2d(xf, yf) * warp_strength;
                let n = tunnel.get_noise_2d(wx, wy * stretch_y);
                (n.abs() < *threshold).then(|| carved(backing(reg, current)))
            }
            PassKind::Bedrock { tile } => {
                let tile = *tile;
                Some(Tile::new(tile, current.wall, variant(reg, tile, &mut self.rng)))
            }
        }
    }

    /// Visits every cell; writes only where every mask allows and `transform` yields a tile.
    pub fn apply<S: TileStore + ?Sized>(&mut self, store: &mut S, reg: &TileRegistry) -> PassStats {
        let t0 = Instant::now();
        let mut stats = PassStats::default();
        let (w, h) = (store.width(), store.height());
        for x in 0..w {
            for y in 0..h {
                let Some(mask) = self.masks.combined(x, y) else {
                    continue;
                };
                stats.visited += 1;
                let current = store.tile(x, y);
                if let Some(tile) = self.transform(reg, current, x, y, mask) {
                    if store.set_tile(x, y, tile) {
                        stats.written += 1;
                    }
                }
            }
        }
        log::debug!(
            target: "worldgen",
            "pass {}: visited={} written={} in {:.2}ms",
            self.name,
            stats.visited,
            stats.written,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        stats
    }
}

#[inline]
fn carved(wall: Wall) -> Tile {
    Tile::new(TileTypeId::EMPTY, wall, 0)
}

/// Wall left behind when `current` is dug out: its foreground if that was solid, else open.
#[inline]
fn backing(reg: &TileRegistry, current: Tile) -> Wall {
    if reg.is_solid(current.ty) {
        Wall::Tile(current.ty)
    } else {
        Wall::None
    }
}

#[inline]
fn variant(reg: &TileRegistry, ty: TileTypeId, rng: &mut ChaCha8Rng) -> u8 {
    reg.get(ty).map_or(0, |t| t.random_variant(rng))
}
