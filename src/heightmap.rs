use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::NoiseMapError;
use crate::gradient::{GradientNoise, PerlinGradient};
use crate::offsets::OctaveOffsets;
use crate::params::NoiseMapParams;
use crate::tilemap::{NoiseMap, Tilemap};

// =============================================================================
// RAW ACCUMULATION
// =============================================================================

/// Unnormalized octave sums together with their observed range.
#[derive(Clone, Debug)]
pub struct RawNoiseMap {
    pub heights: Tilemap<f32>,
    /// Lowest raw height (`f32::MAX` for an empty map)
    pub min: f32,
    /// Highest raw height (`f32::MIN` for an empty map)
    pub max: f32,
}

impl RawNoiseMap {
    /// Remap every cell from `[min, max]` to `[0, 1]`.
    pub fn normalize(self) -> NoiseMap {
        let mut heights = self.heights;
        normalize_in_place(&mut heights, self.min, self.max);
        heights
    }
}

/// Per-call sampling state shared by every cell.
struct OctaveSampler<'a, G> {
    gradient: &'a G,
    offsets: &'a OctaveOffsets,
    scale: f32,
    half_width: f32,
    half_height: f32,
    persistence: f32,
    lacunarity: f32,
}

impl<'a, G: GradientNoise> OctaveSampler<'a, G> {
    fn new(
        params: &NoiseMapParams,
        width: usize,
        height: usize,
        offsets: &'a OctaveOffsets,
        gradient: &'a G,
    ) -> Self {
        Self {
            gradient,
            offsets,
            scale: params.effective_scale(),
            // Centered so that changing the scale zooms around the middle of the map
            half_width: width as f32 / 2.0,
            half_height: height as f32 / 2.0,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
        }
    }

    /// Sum of all octaves at cell `(x, y)`.
    fn raw_height(&self, x: usize, y: usize) -> f32 {
        let mut amplitude = 1.0f32;
        let mut frequency = 1.0f32;
        let mut height = 0.0f32;

        for offset in self.offsets.iter() {
            let sample_x = (x as f32 - self.half_width) / self.scale * frequency + offset.x;
            let sample_y = (y as f32 - self.half_height) / self.scale * frequency + offset.y;

            let value = self.gradient.sample(sample_x, sample_y) * 2.0 - 1.0;
            height += value * amplitude;

            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        height
    }
}

/// Accumulate raw octave sums using explicit offsets.
///
/// `params.seed` and `params.octaves` are ignored; the offsets decide both.
pub fn generate_raw_noise_map<G: GradientNoise>(
    params: &NoiseMapParams,
    offsets: &OctaveOffsets,
    gradient: &G,
) -> Result<RawNoiseMap, NoiseMapError> {
    let (width, height) = params.dimensions()?;
    let sampler = OctaveSampler::new(params, width, height, offsets, gradient);

    let mut heights = Tilemap::new_with(width, height, 0.0f32);
    let mut min_h = f32::MAX;
    let mut max_h = f32::MIN;

    for y in 0..height {
        for x in 0..width {
            let h = sampler.raw_height(x, y);
            if h < min_h { min_h = h; }
            if h > max_h { max_h = h; }
            heights.set(x, y, h);
        }
    }

    Ok(RawNoiseMap { heights, min: min_h, max: max_h })
}

/// Row-parallel version of [`generate_raw_noise_map`]. Produces identical values.
pub fn generate_raw_noise_map_parallel<G: GradientNoise>(
    params: &NoiseMapParams,
    offsets: &OctaveOffsets,
    gradient: &G,
) -> Result<RawNoiseMap, NoiseMapError> {
    let (width, height) = params.dimensions()?;
    let sampler = OctaveSampler::new(params, width, height, offsets, gradient);

    let mut heights = Tilemap::new_with(width, height, 0.0f32);
    if heights.is_empty() {
        return Ok(RawNoiseMap { heights, min: f32::MAX, max: f32::MIN });
    }

    heights
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = sampler.raw_height(x, y);
            }
        });

    // min/max only once every raw value exists
    let (min_h, max_h) = heights
        .as_slice()
        .par_iter()
        .fold(
            || (f32::MAX, f32::MIN),
            |(lo, hi), &h| (if h < lo { h } else { lo }, if h > hi { h } else { hi }),
        )
        .reduce(
            || (f32::MAX, f32::MIN),
            |a, b| (if b.0 < a.0 { b.0 } else { a.0 }, if b.1 > a.1 { b.1 } else { a.1 }),
        );

    Ok(RawNoiseMap { heights, min: min_h, max: max_h })
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Position of `value` within `[a, b]`, clamped to `[0, 1]`. Returns 0 when `a == b`
/// or when the result is NaN.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    let t = (value - a) / (b - a);
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

/// True when `[min, max]` cannot be remapped: flat, empty, or overflowed to inf/NaN.
fn is_degenerate_range(min: f32, max: f32) -> bool {
    !min.is_finite() || !max.is_finite() || max <= min
}

/// Remap every cell from `[min, max]` to `[0, 1]`.
///
/// A flat map (`max <= min`) or a non-finite range becomes all zeros instead of NaN.
pub fn normalize_in_place(map: &mut Tilemap<f32>, min: f32, max: f32) {
    if is_degenerate_range(min, max) {
        map.fill(0.0);
        return;
    }
    for (_, _, h) in map.iter_mut() {
        *h = inverse_lerp(min, max, *h);
    }
}

fn normalize_in_place_parallel(map: &mut Tilemap<f32>, min: f32, max: f32) {
    if is_degenerate_range(min, max) {
        map.fill(0.0);
        return;
    }
    map.as_mut_slice()
        .par_iter_mut()
        .for_each(|h| *h = inverse_lerp(min, max, *h));
}

// =============================================================================
// MAIN NOISE MAP GENERATION
// =============================================================================

/// Generate a normalized noise map with the default Perlin gradient.
pub fn generate_noise_map(params: &NoiseMapParams) -> Result<NoiseMap, NoiseMapError> {
    generate_noise_map_with(params, &PerlinGradient::default())
}

/// Generate a normalized noise map:
/// 1. Draw one seeded offset per octave
/// 2. Sum the octaves for every cell, centered on the middle of the map
/// 3. Remap the raw sums to `[0, 1]`
pub fn generate_noise_map_with<G: GradientNoise>(
    params: &NoiseMapParams,
    gradient: &G,
) -> Result<NoiseMap, NoiseMapError> {
    let offsets = prepare_offsets(params)?;
    let raw = generate_raw_noise_map(params, &offsets, gradient)?;
    log_range(&raw);
    Ok(raw.normalize())
}

/// Parallel counterpart of [`generate_noise_map`].
pub fn generate_noise_map_parallel(params: &NoiseMapParams) -> Result<NoiseMap, NoiseMapError> {
    generate_noise_map_parallel_with(params, &PerlinGradient::default())
}

/// Parallel counterpart of [`generate_noise_map_with`]. Offsets are still drawn
/// sequentially, and normalization starts only after all rows are done.
pub fn generate_noise_map_parallel_with<G: GradientNoise>(
    params: &NoiseMapParams,
    gradient: &G,
) -> Result<NoiseMap, NoiseMapError> {
    let offsets = prepare_offsets(params)?;
    let raw = generate_raw_noise_map_parallel(params, &offsets, gradient)?;
    log_range(&raw);
    let mut heights = raw.heights;
    normalize_in_place_parallel(&mut heights, raw.min, raw.max);
    Ok(heights)
}

/// Validate the parameters and draw the octave offsets.
fn prepare_offsets(params: &NoiseMapParams) -> Result<OctaveOffsets, NoiseMapError> {
    // Validate before anything is allocated
    let (width, height) = params.dimensions()?;
    let octaves = params.octave_count()?;

    debug!(
        width,
        height,
        octaves,
        seed = params.seed,
        scale = params.effective_scale(),
        "generating noise map"
    );

    let offsets = OctaveOffsets::generate(params.seed, octaves, params.offset);
    for (i, offset) in offsets.iter().enumerate() {
        trace!(octave = i, x = offset.x, y = offset.y, "octave offset");
    }
    Ok(offsets)
}

fn log_range(raw: &RawNoiseMap) {
    if is_degenerate_range(raw.min, raw.max) {
        debug!(min = raw.min, max = raw.max, "raw heights are flat or overflowed, normalizing to zero");
    } else {
        debug!(min = raw.min, max = raw.max, "raw height range");
    }
}
