//! Image and JSON export of noise maps.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use serde::Serialize;

use crate::error::ExportError;
use crate::tilemap::NoiseMap;

/// Colormap used when writing a noise map as an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Grayscale,
    Spectral,
}

/// Render as 8-bit grayscale. Values are expected to be normalized (0.0-1.0).
pub fn render_grayscale(map: &NoiseMap) -> GrayImage {
    let mut img: GrayImage = ImageBuffer::new(map.width as u32, map.height as u32);
    for (x, y, &val) in map.iter() {
        img.put_pixel(x as u32, y as u32, Luma([to_byte(val)]));
    }
    img
}

/// Render with the spectral colormap (low = blue, high = red).
pub fn render_spectral(map: &NoiseMap) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(map.width as u32, map.height as u32);
    for (x, y, &val) in map.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(spectral_colormap(val.clamp(0.0, 1.0))));
    }
    img
}

pub fn export_grayscale(map: &NoiseMap, path: impl AsRef<Path>) -> Result<(), ExportError> {
    ensure_not_empty(map)?;
    render_grayscale(map).save(path)?;
    Ok(())
}

pub fn export_spectral(map: &NoiseMap, path: impl AsRef<Path>) -> Result<(), ExportError> {
    ensure_not_empty(map)?;
    render_spectral(map).save(path)?;
    Ok(())
}

/// Export as PNG with the chosen colormap.
pub fn export_image(
    map: &NoiseMap,
    path: impl AsRef<Path>,
    colormap: Colormap,
) -> Result<(), ExportError> {
    match colormap {
        Colormap::Grayscale => export_grayscale(map, path),
        Colormap::Spectral => export_spectral(map, path),
    }
}

/// Write `{ "width", "height", "data" }` with `data` in row-major order.
/// Empty maps are allowed.
pub fn export_json(map: &NoiseMap, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &JsonNoiseMap::from(map))?;
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonNoiseMap<'a> {
    width: usize,
    height: usize,
    data: &'a [f32],
}

impl<'a> From<&'a NoiseMap> for JsonNoiseMap<'a> {
    fn from(map: &'a NoiseMap) -> Self {
        Self {
            width: map.width,
            height: map.height,
            data: map.as_slice(),
        }
    }
}

fn ensure_not_empty(map: &NoiseMap) -> Result<(), ExportError> {
    if map.is_empty() {
        return Err(ExportError::EmptyMap {
            width: map.width,
            height: map.height,
        });
    }
    Ok(())
}

fn to_byte(val: f32) -> u8 {
    (val.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Spectral colormap (matplotlib style): dark blue -> cyan -> green -> yellow -> orange -> red
fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64],  // Dark blue/purple (low)
        [0.20, 0.53, 0.74],  // Blue
        [0.40, 0.76, 0.65],  // Teal
        [0.67, 0.87, 0.64],  // Light green
        [0.90, 0.96, 0.60],  // Yellow-green
        [1.00, 1.00, 0.75],  // Light yellow
        [1.00, 0.88, 0.55],  // Yellow
        [0.99, 0.68, 0.38],  // Light orange
        [0.96, 0.43, 0.26],  // Orange
        [0.84, 0.24, 0.31],  // Red
        [0.62, 0.00, 0.26],  // Dark red (high)
    ];

    let t_scaled = t * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::Tilemap;

    fn gradient_map() -> NoiseMap {
        let mut map = Tilemap::new_with(3, 2, 0.0f32);
        map.set(1, 0, 0.5);
        map.set(2, 0, 1.0);
        map.set(0, 1, 0.25);
        map
    }

    #[test]
    fn test_render_grayscale_values() {
        let img = render_grayscale(&gradient_map());
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [128]);
        assert_eq!(img.get_pixel(2, 0).0, [255]);
        assert_eq!(img.get_pixel(0, 1).0, [64]);
    }

    #[test]
    fn test_spectral_endpoints() {
        assert_eq!(spectral_colormap(0.0), [94, 79, 163]);
        // t = 1.0 lands on the last segment with frac = 1
        assert_eq!(spectral_colormap(1.0), [158, 0, 66]);
    }

    #[test]
    fn test_export_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");

        export_image(&gradient_map(), &path, Colormap::Grayscale).unwrap();

        let loaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 0).0, [255]);

        let spectral_path = dir.path().join("map_spectral.png");
        export_image(&gradient_map(), &spectral_path, Colormap::Spectral).unwrap();
        assert!(spectral_path.exists());
    }

    #[test]
    fn test_export_empty_map_fails() {
        let dir = tempfile::tempdir().unwrap();
        let map: NoiseMap = Tilemap::new(0, 4);
        let err = export_grayscale(&map, dir.path().join("empty.png")).unwrap_err();
        assert!(matches!(err, ExportError::EmptyMap { width: 0, height: 4 }));
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");

        export_json(&gradient_map(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["width"], 3);
        assert_eq!(value["height"], 2);
        assert_eq!(value["data"].as_array().unwrap().len(), 6);
        assert_eq!(value["data"][2], 1.0);
    }
}
