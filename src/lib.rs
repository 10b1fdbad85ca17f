//! Fractal gradient-noise heightmap generation
//!
//! Sums several octaves of gradient noise, each sampled at a seeded random offset,
//! and normalizes the result into `[0, 1]`.

pub mod error;
pub mod export;
pub mod gradient;
pub mod heightmap;
pub mod offsets;
pub mod params;
pub mod tilemap;

pub use error::{ConfigError, ExportError, NoiseMapError};
pub use gradient::{GradientNoise, PerlinGradient};
pub use heightmap::{
    generate_noise_map, generate_noise_map_parallel, generate_noise_map_parallel_with,
    generate_noise_map_with, generate_raw_noise_map, inverse_lerp, RawNoiseMap,
};
pub use offsets::OctaveOffsets;
pub use params::{NoiseMapParams, Offset, MIN_SCALE};
pub use tilemap::{NoiseMap, Tilemap};
