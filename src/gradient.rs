//! Gradient noise primitive sampled by the noise map generator.

use noise::{NoiseFn, Perlin};

/// A smooth, deterministic 2D noise function returning values in `[0, 1]`.
///
/// Equal inputs must give equal outputs. `Sync` so the parallel generator can share it
/// across worker threads.
pub trait GradientNoise: Sync {
    fn sample(&self, x: f32, y: f32) -> f32;
}

impl<F> GradientNoise for F
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    fn sample(&self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// Classic Perlin noise remapped from `[-1, 1]` to `[0, 1]`.
///
/// The permutation seed is fixed per instance; variation between maps comes from the
/// octave offsets, not from reseeding the noise.
#[derive(Clone, Debug)]
pub struct PerlinGradient {
    perlin: Perlin,
}

impl PerlinGradient {
    pub fn new(permutation_seed: u32) -> Self {
        Self {
            perlin: Perlin::new(permutation_seed),
        }
    }
}

impl Default for PerlinGradient {
    fn default() -> Self {
        Self::new(Perlin::DEFAULT_SEED)
    }
}

/// Period of the Perlin permutation table along each axis.
const PERLIN_PERIOD: f64 = 256.0;

impl GradientNoise for PerlinGradient {
    fn sample(&self, x: f32, y: f32) -> f32 {
        if !x.is_finite() || !y.is_finite() {
            return 0.5;
        }
        // The lattice hash repeats every 256 cells, and rem_euclid is exact, so wrapping
        // keeps the value while holding the lattice corner far from isize overflow
        let wx = (x as f64).rem_euclid(PERLIN_PERIOD);
        let wy = (y as f64).rem_euclid(PERLIN_PERIOD);
        let value = self.perlin.get([wx, wy]);
        ((value * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}
