//! Two-phase tile lighting: a per-column scan seeds sky, ambient, glow and
//! torch light, then a four-directional blur spreads it with decay.
//!
//! Values may exceed 1.0 internally; callers clamp for display.
#![forbid(unsafe_code)]

use std::time::Instant;

use catalyst_geom::{GridPos, TileRect};
use catalyst_tiles::TileRegistry;
use catalyst_world::layers::SURFACE;
use catalyst_world::{LayerTable, TileGrid};
use serde::Deserialize;

pub const SKY_LIGHT_INTENSITY: f32 = 1.0;
pub const LIGHT_DECAY_THROUGH_AIR: f32 = 0.91;
pub const LIGHT_DECAY_THROUGH_SOLID: f32 = 0.56;
/// Light below this is black and stops propagating.
pub const MIN_LIGHT_THRESHOLD: f32 = 0.0185;
/// Torch intensity by Chebyshev distance from its cell.
pub const TORCH_FALLOFF: [f32; 4] = [1.0, 0.8, 0.5, 0.2];
pub const BLUR_PASSES: usize = 2;
/// Fraction of the surface band after which direct sky light starts to fade.
pub const SKY_FADE_START: f32 = 0.75;

/// Number of open-air steps a value starting at `intensity` survives before snapping to 0.
pub fn propagation_reach(intensity: f32) -> i32 {
    if intensity.is_nan() || intensity < MIN_LIGHT_THRESHOLD {
        return 0;
    }
    let mut v = intensity;
    let mut steps = 0;
    loop {
        v *= LIGHT_DECAY_THROUGH_AIR;
        if v < MIN_LIGHT_THRESHOLD {
            return steps;
        }
        steps += 1;
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LightingSettings {
    /// Seconds between view-rectangle refreshes.
    #[serde(default = "default_view_refresh_interval")]
    pub view_refresh_interval: f32,
    /// Tiles added around the view rectangle.
    #[serde(default = "default_view_padding")]
    pub view_padding: i32,
}

fn default_view_refresh_interval() -> f32 {
    0.1
}
fn default_view_padding() -> i32 {
    8
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            view_refresh_interval: default_view_refresh_interval(),
            view_padding: default_view_padding(),
        }
    }
}

/// Surface-layer rows and the sky fade line derived from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBand {
    pub start: i32,
    pub end: i32,
    pub fade_start: f32,
    pub fade_end: f32,
}

impl SurfaceBand {
    pub fn new(start: i32, end: i32, height: i32) -> Self {
        let fade_start = start as f32 + (end - start) as f32 * SKY_FADE_START;
        let fade_end = fade_start.max(end as f32).min((height - 1) as f32);
        Self {
            start,
            end,
            fade_start,
            fade_end,
        }
    }

    pub fn from_layers(layers: &LayerTable, height: i32) -> Self {
        let (start, end) = layers.row_span(SURFACE, height).unwrap_or((0, 0));
        Self::new(start, end, height)
    }

    #[inline]
    pub fn contains(&self, y: i32) -> bool {
        y >= self.start && y < self.end
    }

    /// Direct sky light at row `y` for a column still open to the sky.
    pub fn sky_at(&self, y: i32) -> f32 {
        let yf = y as f32;
        if yf < self.fade_start {
            return SKY_LIGHT_INTENSITY;
        }
        if yf >= self.fade_end {
            return 0.0;
        }
        let range = self.fade_end - self.fade_start;
        if range <= 0.0 {
            return SKY_LIGHT_INTENSITY;
        }
        let t = (yf - self.fade_start) / range;
        (SKY_LIGHT_INTENSITY * (1.0 - t)).max(0.0)
    }
}

pub struct LightingEngine {
    width: i32,
    height: i32,
    band: SurfaceBand,
    torch: Option<GridPos>,
    settings: LightingSettings,
    last_area: Option<TileRect>,
    updates: u64,
    view_timer: f32,
}

impl LightingEngine {
    pub fn new(width: i32, height: i32, layers: &LayerTable, settings: LightingSettings) -> Self {
        Self {
            width,
            height,
            band: SurfaceBand::from_layers(layers, height),
            torch: None,
            settings,
            last_area: None,
            updates: 0,
            view_timer: 0.0,
        }
    }

    #[inline]
    pub fn surface_band(&self) -> SurfaceBand {
        self.band
    }

    #[inline]
    pub fn settings(&self) -> &LightingSettings {
        &self.settings
    }

    /// Moves (or removes) the point light. Takes effect on the next update.
    pub fn set_torch(&mut self, cell: Option<GridPos>) {
        self.torch = cell;
    }

    #[inline]
    pub fn torch(&self) -> Option<GridPos> {
        self.torch
    }

    #[inline]
    pub fn last_area(&self) -> Option<TileRect> {
        self.last_area
    }

    /// Number of area updates that actually ran.
    #[inline]
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Padding around an edit that lets the brightest source re-settle.
    pub fn edit_radius(&self, reg: &TileRegistry) -> i32 {
        let brightest = SKY_LIGHT_INTENSITY
            .max(reg.max_glow())
            .max(TORCH_FALLOFF[0]);
        propagation_reach(brightest) + 1
    }

    pub fn update_all(&mut self, grid: &mut TileGrid, reg: &TileRegistry) {
        let bounds = grid.bounds();
        self.update_area(grid, reg, bounds);
    }

    /// Recomputes the padded square around an edited cell.
    pub fn update_around(&mut self, grid: &mut TileGrid, reg: &TileRegistry, cell: GridPos) -> Option<TileRect> {
        let rect = TileRect::centered(cell, self.edit_radius(reg));
        self.update_area(grid, reg, rect)
    }

    /// Periodic refresh of the visible rectangle plus padding.
    ///
    /// Returns whether an update ran this call.
    pub fn update_view(&mut self, grid: &mut TileGrid, reg: &TileRegistry, view: TileRect, dt: f32) -> bool {
        self.view_timer += dt;
        if self.view_timer < self.settings.view_refresh_interval {
            return false;
        }
        self.view_timer = 0.0;
        let rect = view.padded(self.settings.view_padding);
        self.update_area(grid, reg, rect).is_some()
    }

    /// Scan then blur over `area` clamped to the world. Returns the rectangle processed.
    pub fn update_area(&mut self, grid: &mut TileGrid, reg: &TileRegistry, area: TileRect) -> Option<TileRect> {
        let area = area.clamp_to(self.width.min(grid.width()), self.height.min(grid.height()))?;
        let t0 = Instant::now();
        self.scan(grid, reg, area);
        for _ in 0..BLUR_PASSES {
            blur_pass(grid, reg, area);
        }
        self.last_area = Some(area);
        self.updates += 1;
        log::debug!(
            target: "lighting",
            "lit {}x{} at ({}, {}) in {}us",
            area.width,
            area.height,
            area.x,
            area.y,
            t0.elapsed().as_micros()
        );
        Some(area)
    }

    fn scan(&self, grid: &mut TileGrid, reg: &TileRegistry, area: TileRect) {
        let band = self.band;
        for x in area.left()..area.right() {
            let mut in_sky = true;
            // Rows above the area are walked only to track sky occlusion.
            for y in 0..area.bottom() {
                let tile = grid.get(x, y);
                let solid = reg.is_solid(tile.ty);
                if y < area.top() {
                    if solid {
                        in_sky = false;
                    }
                    continue;
                }

                let mut light = 0.0f32;
                if let Some(t) = self.torch {
                    let d = t.chebyshev(GridPos::new(x, y)) as usize;
                    if let Some(&v) = TORCH_FALLOFF.get(d) {
                        light = light.max(v);
                    }
                }
                let glow = reg.glow(tile.ty);
                if glow > 0.0 {
                    light = light.max(glow);
                }
                if !solid && !reg.is_wall_solid(tile.wall) && band.contains(y) {
                    light = light.max(SKY_LIGHT_INTENSITY);
                }
                if in_sky {
                    light = light.max(band.sky_at(y));
                    // The blocking tile itself is still sky-lit.
                    if solid {
                        in_sky = false;
                    }
                }
                grid.set_light(x, y, light);
            }
        }
    }
}

fn blur_pass(grid: &mut TileGrid, reg: &TileRegistry, area: TileRect) {
    for y in area.top()..area.bottom() {
        blur_line(grid, reg, (area.left()..area.right()).map(|x| (x, y)));
        blur_line(grid, reg, (area.left()..area.right()).rev().map(|x| (x, y)));
    }
    for x in area.left()..area.right() {
        blur_line(grid, reg, (area.top()..area.bottom()).map(|y| (x, y)));
        blur_line(grid, reg, (area.top()..area.bottom()).rev().map(|y| (x, y)));
    }
}

fn blur_line(grid: &mut TileGrid, reg: &TileRegistry, cells: impl Iterator<Item = (i32, i32)>) {
    let mut carried = 0.0f32;
    for (x, y) in cells {
        let here = grid.light(x, y);
        if here > carried {
            carried = here;
        } else if carried >= MIN_LIGHT_THRESHOLD {
            grid.set_light(x, y, here.max(carried));
        }
        if carried > 0.0 {
            carried *= if reg.is_solid(grid.get(x, y).ty) {
                LIGHT_DECAY_THROUGH_SOLID
            } else {
                LIGHT_DECAY_THROUGH_AIR
            };
            if carried < MIN_LIGHT_THRESHOLD {
                carried = 0.0;
            }
        }
    }
}
