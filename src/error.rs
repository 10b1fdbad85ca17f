//! Error types for noise map generation, settings loading and export.

use thiserror::Error;

/// Invalid generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoiseMapError {
    /// Width or height is negative.
    #[error("invalid map dimensions {width}x{height}: width and height must not be negative")]
    InvalidDimension { width: i32, height: i32 },

    /// Octave count is negative. Zero octaves is allowed and yields a flat map.
    #[error("invalid octave count {0}: must not be negative")]
    InvalidOctaveCount(i32),
}

/// Failure to read or parse a JSON settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to write a noise map to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// PNG encoders reject zero-sized images.
    #[error("cannot export an empty {width}x{height} map as an image")]
    EmptyMap { width: usize, height: usize },
}
