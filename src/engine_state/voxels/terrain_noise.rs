//! # Terrain Noise Module
//!
//! Height-field sources for terrain generation.
//!
//! The world only needs a deterministic scalar per (x, z) column. Anything
//! implementing [`FractalNoise`] can drive generation, including plain closures,
//! which keeps tests independent of the Perlin implementation.

use ::noise::{NoiseFn, Perlin};

/// A deterministic 2D fractal height source.
pub trait FractalNoise {
    /// Samples the field at `(x, z)` summing `octaves` layers.
    ///
    /// Implementations must be pure: equal inputs always give equal outputs.
    fn fractal(&self, octaves: u32, x: f64, z: f64) -> f64;
}

impl<F> FractalNoise for F
where
    F: Fn(u32, f64, f64) -> f64,
{
    fn fractal(&self, octaves: u32, x: f64, z: f64) -> f64 {
        self(octaves, x, z)
    }
}

/// Fractal Brownian motion over Perlin noise.
///
/// Each octave doubles the frequency and halves the amplitude; the sum is
/// normalised by the total amplitude, keeping the result roughly in `[-1, 1]`.
pub struct PerlinFractal {
    perlin: Perlin,
}

impl PerlinFractal {
    /// Creates a source seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl FractalNoise for PerlinFractal {
    fn fractal(&self, octaves: u32, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.perlin.get([x * frequency, z * frequency]) * amplitude;
            max_amplitude += amplitude;
            frequency *= 2.0;
            amplitude *= 0.5;
        }

        if max_amplitude == 0.0 {
            0.0
        } else {
            total / max_amplitude
        }
    }
}
