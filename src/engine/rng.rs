//! Deterministic randomness for maze generation
//!
//! Every random choice a generator makes goes through [`MazeRng`], a PCG64
//! stream seeded from a single `u64`. The same seed on the same grid size
//! yields the same maze and the same checkpoint stream on every platform.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Seeded random source used by the maze generators
#[derive(Debug, Clone)]
pub struct MazeRng {
    seed: u64,
    rng: Pcg64,
}

impl MazeRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// The seed this stream was created from
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty range");
        self.rng.gen_range(0..len)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
