//! Seeded per-octave sampling offsets.
//!
//! Each octave samples the gradient noise at a different random position so that the
//! layers do not line up. The offsets are the only place the map seed enters the
//! computation, so their draw order is fixed: octave 0 first, `x` before `y`.

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::params::Offset;

/// Range each offset component is drawn from (upper bound exclusive).
pub const OFFSET_RANGE: Range<i32> = -100_000..100_000;

/// Sampling offsets for every octave of one generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct OctaveOffsets {
    offsets: Vec<Offset>,
}

impl OctaveOffsets {
    /// Draw `octaves` offsets from a PRNG seeded with `seed`, each shifted by `global`.
    /// Negative seeds use their two's complement bit pattern.
    pub fn generate(seed: i64, octaves: usize, global: Offset) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let offsets = (0..octaves)
            .map(|_| {
                let x = rng.gen_range(OFFSET_RANGE) as f32 + global.x;
                let y = rng.gen_range(OFFSET_RANGE) as f32 + global.y;
                Offset::new(x, y)
            })
            .collect();
        Self { offsets }
    }

    /// Use explicit offsets instead of drawing them.
    pub fn from_offsets(offsets: Vec<Offset>) -> Self {
        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn get(&self, octave: usize) -> Option<&Offset> {
        self.offsets.get(octave)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Offset> {
        self.offsets.iter()
    }

    pub fn as_slice(&self) -> &[Offset] {
        &self.offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_offsets() {
        let a = OctaveOffsets::generate(1234, 8, Offset::ZERO);
        let b = OctaveOffsets::generate(1234, 8, Offset::ZERO);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = OctaveOffsets::generate(1, 4, Offset::ZERO);
        let b = OctaveOffsets::generate(2, 4, Offset::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_negative_seed() {
        let a = OctaveOffsets::generate(-1, 4, Offset::ZERO);
        assert_eq!(a, OctaveOffsets::generate(-1, 4, Offset::ZERO));
        assert_ne!(a, OctaveOffsets::generate(1, 4, Offset::ZERO));
        assert_ne!(a, OctaveOffsets::generate(0, 4, Offset::ZERO));
    }

    #[test]
    fn test_fewer_octaves_is_prefix() {
        // Draws happen octave by octave, so a shorter run is a prefix of a longer one
        let short = OctaveOffsets::generate(77, 3, Offset::ZERO);
        let long = OctaveOffsets::generate(77, 6, Offset::ZERO);
        assert_eq!(short.as_slice(), &long.as_slice()[..3]);
    }

    #[test]
    fn test_offsets_are_integral_and_in_range() {
        let offsets = OctaveOffsets::generate(42, 32, Offset::ZERO);
        for offset in offsets.iter() {
            for v in [offset.x, offset.y] {
                assert_eq!(v.fract(), 0.0);
                assert!(v >= OFFSET_RANGE.start as f32 && v < OFFSET_RANGE.end as f32);
            }
        }
    }

    #[test]
    fn test_global_offset_is_added() {
        let base = OctaveOffsets::generate(9, 5, Offset::ZERO);
        let shifted = OctaveOffsets::generate(9, 5, Offset::new(0.5, -2.0));
        for (b, s) in base.iter().zip(shifted.iter()) {
            assert_eq!(s.x, b.x + 0.5);
            assert_eq!(s.y, b.y - 2.0);
        }
    }

    #[test]
    fn test_zero_octaves() {
        let offsets = OctaveOffsets::generate(3, 0, Offset::new(1.0, 1.0));
        assert!(offsets.is_empty());
        assert_eq!(offsets.get(0), None);
    }
}
