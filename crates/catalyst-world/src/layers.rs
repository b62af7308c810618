use serde::Deserialize;

use crate::error::GenError;

pub const SPACE: &str = "space";
pub const SURFACE: &str = "surface";
pub const UNDERGROUND: &str = "underground";
pub const CAVERN: &str = "cavern";
pub const UNDERWORLD: &str = "underworld";

/// Configured as `{ name, end }`; a layer starts where the previous one ends.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LayerDef {
    pub name: String,
    pub end: f32,
}

/// Half-open band `[start, end)` of the world height, in Y ratios.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: String,
    pub start: f32,
    pub end: f32,
}

impl Layer {
    #[inline]
    pub fn contains_ratio(&self, ratio: f32) -> bool {
        ratio >= self.start && ratio < self.end
    }
}

/// Ordered, gap-free list of layers covering `[0, 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerTable {
    layers: Vec<Layer>,
}

impl Default for LayerTable {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn standard_layer_defs() -> Vec<LayerDef> {
    [
        (SPACE, 0.05),
        (SURFACE, 0.15),
        (UNDERGROUND, 0.5),
        (CAVERN, 0.9),
        (UNDERWORLD, 1.0),
    ]
    .into_iter()
    .map(|(name, end)| LayerDef {
        name: name.to_string(),
        end,
    })
    .collect()
}

impl LayerTable {
    /// space 0.05, surface 0.15, underground 0.5, cavern 0.9, underworld 1.0.
    pub fn standard() -> Self {
        let mut start = 0.0;
        let layers = standard_layer_defs()
            .into_iter()
            .map(|d| {
                let l = Layer {
                    name: d.name,
                    start,
                    end: d.end,
                };
                start = d.end;
                l
            })
            .collect();
        Self { layers }
    }

    pub fn from_ends(defs: &[LayerDef]) -> Result<Self, GenError> {
        if defs.is_empty() {
            return Err(GenError::InvalidLayers("no layers".into()));
        }
        let mut layers = Vec::with_capacity(defs.len());
        let mut start = 0.0f32;
        for d in defs {
            if d.name.is_empty() {
                return Err(GenError::InvalidLayers("layer without a name".into()));
            }
            if !(d.end > start) || d.end > 1.0 {
                return Err(GenError::InvalidLayers(format!(
                    "layer '{}' ends at {} after starting at {}",
                    d.name, d.end, start
                )));
            }
            if layers.iter().any(|l: &Layer| l.name == d.name) {
                return Err(GenError::InvalidLayers(format!(
                    "layer '{}' listed twice",
                    d.name
                )));
            }
            layers.push(Layer {
                name: d.name.clone(),
                start,
                end: d.end,
            });
            start = d.end;
        }
        if start != 1.0 {
            return Err(GenError::InvalidLayers(format!(
                "last layer ends at {} instead of 1.0",
                start
            )));
        }
        Ok(Self { layers })
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// `(start, end)` ratios of a named layer.
    pub fn bounds(&self, name: &str) -> Option<(f32, f32)> {
        self.get(name).map(|l| (l.start, l.end))
    }

    pub fn layer_at_row(&self, y: i32, height: i32) -> Option<&Layer> {
        if height <= 0 || y < 0 || y >= height {
            return None;
        }
        let ratio = y as f32 / height as f32;
        self.layers.iter().find(|l| l.contains_ratio(ratio))
    }

    pub fn contains_row(&self, name: &str, y: i32, height: i32) -> bool {
        self.layer_at_row(y, height).is_some_and(|l| l.name == name)
    }

    /// Rows `(start, end)` of a layer, each truncated from `height * ratio`.
    pub fn row_span(&self, name: &str, height: i32) -> Option<(i32, i32)> {
        self.bounds(name).map(|(s, e)| {
            let h = height as f32;
            ((h * s) as i32, (h * e) as i32)
        })
    }

    /// Vertical midpoint of the surface layer, in rows.
    pub fn surface_baseline(&self, height: i32) -> f32 {
        match self.bounds(SURFACE) {
            Some((s, e)) => height as f32 * (s + e) * 0.5,
            None => height as f32 * 0.5,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_contiguous() {
        let t = LayerTable::standard();
        let mut prev = 0.0;
        for l in t.iter() {
            assert_eq!(l.start, prev);
            prev = l.end;
        }
        assert_eq!(prev, 1.0);
        assert_eq!(t.bounds(SURFACE), Some((0.05, 0.15)));
    }

    #[test]
    fn rows_map_to_layers() {
        let t = LayerTable::standard();
        assert!(t.contains_row(SPACE, 4, 100));
        assert!(t.contains_row(SURFACE, 5, 100));
        assert!(t.contains_row(SURFACE, 14, 100));
        assert!(t.contains_row(UNDERGROUND, 15, 100));
        assert!(t.contains_row(UNDERWORLD, 99, 100));
        assert!(t.layer_at_row(100, 100).is_none());
        assert_eq!(t.row_span(SURFACE, 400), Some((20, 60)));
        assert_eq!(t.surface_baseline(400), 40.0);
    }

    #[test]
    fn rejects_bad_tables() {
        let d = |n: &str, e: f32| LayerDef {
            name: n.into(),
            end: e,
        };
        assert!(LayerTable::from_ends(&[]).is_err());
        assert!(LayerTable::from_ends(&[d("a", 0.5)]).is_err());
        assert!(LayerTable::from_ends(&[d("a", 0.5), d("b", 0.4), d("c", 1.0)]).is_err());
        assert!(LayerTable::from_ends(&[d("a", 0.5), d("a", 1.0)]).is_err());
        let ok = LayerTable::from_ends(&[d("a", 0.25), d("b", 1.0)]).unwrap();
        assert_eq!(ok.bounds("b"), Some((0.25, 1.0)));
    }
}
