//! Random number generation for dungeon building
//!
//! Uses a seeded ChaCha RNG so a seed always reproduces the same level.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Game random number generator
///
/// Wraps ChaCha8Rng and remembers the seed it was created from.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns `min + 2k` for a uniformly drawn `k` in `0..(max - min) / 2`
    ///
    /// The upper bound is exclusive and the result keeps the parity of `min`.
    /// Collapses to `min` when the span is shorter than two.
    pub fn random_even(&mut self, min: i64, max: i64) -> i64 {
        let steps = ((max - min) / 2).max(0);
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        min + i64::from(self.rn2(steps)) * 2
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
