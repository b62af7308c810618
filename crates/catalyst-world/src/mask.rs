use fastnoise_lite::FastNoiseLite;

use crate::layers::LayerTable;
use crate::noise::NoiseConfig;

/// Whether listed layers are the only ones kept, or the ones removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskMode {
    Allow,
    Block,
}

/// Per-column perturbation of a layer band's edges, in Y-ratio units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryNoise {
    pub seed: i32,
    pub start_amplitude: f32,
    pub end_amplitude: f32,
    pub frequency: f32,
}

impl BoundaryNoise {
    pub const DEFAULT_AMPLITUDE: f32 = 0.01;
    pub const DEFAULT_FREQUENCY: f32 = 0.02;

    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            start_amplitude: Self::DEFAULT_AMPLITUDE,
            end_amplitude: Self::DEFAULT_AMPLITUDE,
            frequency: Self::DEFAULT_FREQUENCY,
        }
    }

    pub fn with_amplitudes(mut self, start: f32, end: f32) -> Self {
        self.start_amplitude = start;
        self.end_amplitude = end;
        self
    }

    fn edge(&self, seed: i32, amplitude: f32) -> Option<(FastNoiseLite, f32)> {
        let usable = |v: f32| v.is_finite() && v != 0.0;
        if !usable(amplitude) || !usable(self.frequency) || self.frequency < 0.0 {
            return None;
        }
        Some((NoiseConfig::plain(self.frequency).build(seed), amplitude))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerMaskOptions {
    pub boundary: Option<BoundaryNoise>,
    /// Ramp allowed cells from 0 to 1 over this many rows away from a disallowed row.
    pub feather_rows: Option<u32>,
}

/// Constant-valued mask; the implicit first mask of every pass.
#[derive(Clone, Debug)]
pub struct DefaultMask {
    width: i32,
    height: i32,
    value: f32,
}

impl DefaultMask {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_value(width, height, 1.0)
    }

    pub fn with_value(width: i32, height: i32, value: f32) -> Self {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            width,
            height,
            value,
        }
    }

    #[inline]
    pub fn value(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            0.0
        } else {
            self.value
        }
    }
}

/// Weight field gating a pass to (or away from) named layers.
#[derive(Clone, Debug)]
pub struct LayerMask {
    width: i32,
    height: i32,
    values: Vec<f32>,
}

impl LayerMask {
    pub fn new<S: AsRef<str>>(
        width: i32,
        height: i32,
        table: &LayerTable,
        names: &[S],
        mode: MaskMode,
    ) -> Self {
        Self::with_options(width, height, table, names, mode, LayerMaskOptions::default())
    }

    pub fn with_options<S: AsRef<str>>(
        width: i32,
        height: i32,
        table: &LayerTable,
        names: &[S],
        mode: MaskMode,
        opts: LayerMaskOptions,
    ) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut bands = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match table.bounds(name) {
                Some(b) => bands.push(b),
                None => log::warn!(target: "worldgen", "layer mask: unknown layer '{}'", name),
            }
        }

        let (start_edge, end_edge) = match opts.boundary {
            Some(b) => (
                b.edge(b.seed, b.start_amplitude),
                b.edge(b.seed.wrapping_add(1), b.end_amplitude),
            ),
            None => (None, None),
        };

        let w = width as usize;
        let mut values = vec![0.0f32; w * height as usize];
        let mut column = vec![false; height as usize];
        let mut perturbed: Vec<(f32, f32)> = Vec::with_capacity(bands.len());
        for x in 0..width {
            perturbed.clear();
            let s_off = sample_edge(&start_edge, x);
            let e_off = sample_edge(&end_edge, x);
            for &(s, e) in &bands {
                // World edges stay pinned so the top and bottom rows keep their layer.
                let s = if s <= 0.0 { s } else { (s + s_off).clamp(0.0, 1.0) };
                let e = if e >= 1.0 { e } else { (e + e_off).clamp(0.0, 1.0) };
                if s < e {
                    perturbed.push((s, e));
                }
            }
            for y in 0..height {
                let ratio = y as f32 / height as f32;
                let inside = perturbed.iter().any(|&(s, e)| ratio >= s && ratio < e);
                column[y as usize] = match mode {
                    MaskMode::Allow => inside,
                    MaskMode::Block => !inside,
                };
            }
            let feather = opts.feather_rows.filter(|&f| f > 0);
            for y in 0..height as usize {
                if !column[y] {
                    continue;
                }
                let v = match feather {
                    Some(f) => match distance_to_disallowed(&column, y) {
                        Some(d) => (d as f32 / f as f32).min(1.0),
                        None => 1.0,
                    },
                    None => 1.0,
                };
                values[y * w + x as usize] = v;
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    pub fn value(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0.0;
        }
        self.values[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn is_allowed(&self, x: i32, y: i32) -> bool {
        self.value(x, y) > 0.0
    }
}

fn sample_edge(edge: &Option<(FastNoiseLite, f32)>, x: i32) -> f32 {
    match edge {
        Some((n, amp)) => n.get_noise_2d(x as f32, 0.0) * amp,
        None => 0.0,
    }
}

fn distance_to_disallowed(column: &[bool], y: usize) -> Option<usize> {
    let up = column[..y].iter().rev().position(|&a| !a).map(|d| d + 1);
    let down = column[y + 1..].iter().position(|&a| !a).map(|d| d + 1);
    match (up, down) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// One of the closed set of mask kinds a pass can carry.
#[derive(Clone, Debug)]
pub enum PassMask {
    Default(DefaultMask),
    Layer(LayerMask),
}

impl PassMask {
    #[inline]
    pub fn value(&self, x: i32, y: i32) -> f32 {
        match self {
            PassMask::Default(m) => m.value(x, y),
            PassMask::Layer(m) => m.value(x, y),
        }
    }

    #[inline]
    pub fn is_allowed(&self, x: i32, y: i32) -> bool {
        self.value(x, y) > 0.0
    }
}

impl From<LayerMask> for PassMask {
    fn from(m: LayerMask) -> Self {
        PassMask::Layer(m)
    }
}

impl From<DefaultMask> for PassMask {
    fn from(m: DefaultMask) -> Self {
        PassMask::Default(m)
    }
}

/// Masks attached to one pass; always starts with a [`DefaultMask`].
#[derive(Clone, Debug)]
pub struct MaskStack {
    masks: Vec<PassMask>,
}

impl MaskStack {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            masks: vec![PassMask::Default(DefaultMask::new(width, height))],
        }
    }

    pub fn push(&mut self, mask: impl Into<PassMask>) {
        self.masks.push(mask.into());
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PassMask> {
        self.masks.iter()
    }

    /// Product of all mask values, or `None` if any mask disallows the cell.
    pub fn combined(&self, x: i32, y: i32) -> Option<f32> {
        let mut product = 1.0f32;
        for m in &self.masks {
            let v = m.value(x, y);
            if v <= 0.0 {
                return None;
            }
            product *= v;
        }
        (product > 0.0).then_some(product)
    }

    pub fn is_allowed(&self, x: i32, y: i32) -> bool {
        self.combined(x, y).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{CAVERN, SPACE, SURFACE};

    #[test]
    fn feather_ramps_away_from_blocked_rows() {
        let table = LayerTable::standard();
        let opts = LayerMaskOptions {
            boundary: None,
            feather_rows: Some(4),
        };
        let m = LayerMask::with_options(1, 100, &table, &[SPACE, SURFACE], MaskMode::Block, opts);
        assert_eq!(m.value(0, 14), 0.0);
        assert_eq!(m.value(0, 15), 0.25);
        assert_eq!(m.value(0, 16), 0.5);
        assert_eq!(m.value(0, 18), 1.0);
        assert_eq!(m.value(0, 99), 1.0);
    }

    #[test]
    fn zero_amplitude_matches_unperturbed() {
        let table = LayerTable::standard();
        let plain = LayerMask::new(32, 100, &table, &[CAVERN], MaskMode::Allow);
        let opts = LayerMaskOptions {
            boundary: Some(BoundaryNoise::new(7).with_amplitudes(0.0, 0.0)),
            feather_rows: None,
        };
        let noisy = LayerMask::with_options(32, 100, &table, &[CAVERN], MaskMode::Allow, opts);
        assert_eq!(plain.values, noisy.values);
    }

    #[test]
    fn zero_frequency_disables_noise() {
        let table = LayerTable::standard();
        let plain = LayerMask::new(16, 100, &table, &[SURFACE], MaskMode::Allow);
        let mut b = BoundaryNoise::new(3);
        b.frequency = 0.0;
        let opts = LayerMaskOptions {
            boundary: Some(b),
            feather_rows: None,
        };
        let m = LayerMask::with_options(16, 100, &table, &[SURFACE], MaskMode::Allow, opts);
        assert_eq!(plain.values, m.values);
        assert!(m.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn boundary_noise_moves_edges_per_column() {
        let table = LayerTable::standard();
        let opts = LayerMaskOptions {
            boundary: Some(BoundaryNoise {
                seed: 11,
                start_amplitude: 0.1,
                end_amplitude: 0.1,
                frequency: 0.05,
            }),
            feather_rows: None,
        };
        let m = LayerMask::with_options(256, 200, &table, &[CAVERN], MaskMode::Allow, opts);
        let first_rows: Vec<i32> = (0..256)
            .map(|x| (0..200).find(|&y| m.is_allowed(x, y)).unwrap_or(-1))
            .collect();
        let min = first_rows.iter().copied().min().unwrap();
        let max = first_rows.iter().copied().max().unwrap();
        assert!(max > min, "start edge never moved");
        // Nominal start row 100, amplitude 0.1 of 200 rows.
        assert!(min >= 80 && max <= 120);
    }

    #[test]
    fn stack_multiplies_and_ands() {
        let table = LayerTable::standard();
        let mut stack = MaskStack::new(4, 100);
        assert_eq!(stack.combined(0, 50), Some(1.0));
        stack.push(DefaultMask::with_value(4, 100, 0.5));
        stack.push(LayerMask::new(4, 100, &table, &[CAVERN], MaskMode::Allow));
        assert_eq!(stack.combined(0, 60), Some(0.5));
        assert_eq!(stack.combined(0, 10), None);
        assert_eq!(stack.combined(-1, 60), None);
        stack.push(DefaultMask::with_value(4, 100, 0.0));
        assert_eq!(stack.combined(0, 60), None);
    }
}
