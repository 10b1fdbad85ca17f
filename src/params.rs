//! Noise map generation parameters and JSON settings files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, NoiseMapError};

/// Smallest usable scale. Non-positive scales are replaced with this value.
pub const MIN_SCALE: f32 = 0.0001;

/// A 2D offset in noise space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Parameters for a single noise map generation call.
///
/// Dimensions and octave count are signed so that values read from settings files
/// or the command line can be validated instead of silently wrapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseMapParams {
    /// Map width in cells
    pub width: i32,
    /// Map height in cells
    pub height: i32,
    /// Seed for the per-octave offsets. Any value, negative included.
    pub seed: i64,
    /// Zoom factor (higher = larger features). Clamped to `MIN_SCALE` when <= 0.
    pub scale: f32,
    /// Number of noise octaves
    pub octaves: i32,
    /// Amplitude multiplier per octave (0.0-1.0)
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
    /// Global panning offset added to every octave
    pub offset: Offset,
}

impl Default for NoiseMapParams {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: 0,
            scale: 25.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Offset::ZERO,
        }
    }
}

impl NoiseMapParams {
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Broad, gentle terrain.
    pub fn rolling_hills(seed: i64) -> Self {
        Self {
            seed,
            scale: 60.0,
            octaves: 3,
            persistence: 0.4,
            lacunarity: 2.0,
            ..Default::default()
        }
    }

    /// Jagged terrain with strong high-frequency detail.
    pub fn rugged(seed: i64) -> Self {
        Self {
            seed,
            scale: 30.0,
            octaves: 7,
            persistence: 0.6,
            lacunarity: 2.2,
            ..Default::default()
        }
    }

    /// Scale actually used for sampling.
    pub fn effective_scale(&self) -> f32 {
        if self.scale <= 0.0 {
            MIN_SCALE
        } else {
            self.scale
        }
    }

    /// Validated `(width, height)`.
    pub fn dimensions(&self) -> Result<(usize, usize), NoiseMapError> {
        if self.width < 0 || self.height < 0 {
            return Err(NoiseMapError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok((self.width as usize, self.height as usize))
    }

    /// Validated octave count. Zero is allowed.
    pub fn octave_count(&self) -> Result<usize, NoiseMapError> {
        usize::try_from(self.octaves).map_err(|_| NoiseMapError::InvalidOctaveCount(self.octaves))
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load parameters from a JSON settings file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
