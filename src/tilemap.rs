//! Row-major 2D grid used for noise maps.

/// A 2D grid of cells stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

/// Normalized heightmap produced by the generator. Values lie in `[0, 1]`.
pub type NoiseMap = Tilemap<f32>;

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Tilemap<T> {
    /// Index into the data array. Panics when out of bounds.
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) out of bounds for {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All cells, row by row.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// A single row. Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row {} out of bounds for height {}", y, self.height);
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks() rejects a zero chunk size; a zero-width map has no cells anyway
        self.data.chunks(self.width.max(1))
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

/// Statistics for f32 maps
impl Tilemap<f32> {
    /// Smallest and largest value, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let mut min_h = f32::MAX;
        let mut max_h = f32::MIN;
        for &h in &self.data {
            if h < min_h { min_h = h; }
            if h > max_h { max_h = h; }
        }
        Some((min_h, max_h))
    }

    /// Arithmetic mean, or `None` for an empty map.
    pub fn mean(&self) -> Option<f32> {
        if self.data.is_empty() {
            return None;
        }
        let sum: f64 = self.data.iter().map(|&h| h as f64).sum();
        Some((sum / self.data.len() as f64) as f32)
    }

    /// Mean absolute difference between horizontally and vertically adjacent cells.
    /// Higher values mean more fine-grained detail.
    pub fn roughness(&self) -> f32 {
        let mut total = 0.0f64;
        let mut count = 0usize;
        for y in 0..self.height {
            for x in 0..self.width {
                let h = *self.get(x, y);
                if x + 1 < self.width {
                    total += (h - *self.get(x + 1, y)).abs() as f64;
                    count += 1;
                }
                if y + 1 < self.height {
                    total += (h - *self.get(x, y + 1)).abs() as f64;
                    count += 1;
                }
            }
        }
        if count == 0 {
            0.0
        } else {
            (total / count as f64) as f32
        }
    }
}
