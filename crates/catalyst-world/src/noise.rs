use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use serde::Deserialize;

/// OpenSimplex2 noise field parameters; the seed is supplied at build time.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NoiseConfig {
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default)]
    pub fractal: Option<FractalConfig>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FractalConfig {
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_gain")]
    pub gain: f32,
    #[serde(default)]
    pub weighted_strength: f32,
}

fn default_frequency() -> f32 {
    0.01
}
fn default_octaves() -> i32 {
    3
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_gain() -> f32 {
    0.5
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            octaves: default_octaves(),
            lacunarity: default_lacunarity(),
            gain: default_gain(),
            weighted_strength: 0.0,
        }
    }
}

impl NoiseConfig {
    pub fn plain(frequency: f32) -> Self {
        Self {
            frequency,
            fractal: None,
        }
    }

    pub fn fbm(frequency: f32, octaves: i32, lacunarity: f32, gain: f32, weighted: f32) -> Self {
        Self {
            frequency,
            fractal: Some(FractalConfig {
                octaves,
                lacunarity,
                gain,
                weighted_strength: weighted,
            }),
        }
    }

    pub fn build(&self, seed: i32) -> FastNoiseLite {
        let mut n = FastNoiseLite::with_seed(seed);
        n.set_noise_type(Some(NoiseType::OpenSimplex2));
        n.set_frequency(Some(self.frequency));
        if let Some(f) = &self.fractal {
            n.set_fractal_type(Some(FractalType::FBm));
            n.set_fractal_octaves(Some(f.octaves));
            n.set_fractal_lacunarity(Some(f.lacunarity));
            n.set_fractal_gain(Some(f.gain));
            n.set_fractal_weighted_strength(Some(f.weighted_strength));
        }
        n
    }
}
