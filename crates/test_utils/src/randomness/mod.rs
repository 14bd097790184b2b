//! Deterministic randomness for reproducible tests

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

/// Deterministic random number generator for tests
pub struct TestRng {
    rng: ChaCha20Rng,
}

impl TestRng {
    /// Create a new test RNG with the specified seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Create a test RNG with the default seed 12345
    pub fn with_default_seed() -> Self {
        Self::new(12345)
    }

    /// Fill a buffer with random bytes
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }

    /// Generate a random value
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// `n` independent draws from N(0, 1)
    pub fn standard_normal(&mut self, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| -> f64 { StandardNormal.sample(&mut self.rng) })
            .collect()
    }

    /// `n` independent draws from N(0, sigma). A non-positive or non-finite
    /// `sigma` yields zeros.
    pub fn normal(&mut self, n: usize, sigma: f64) -> Vec<f64> {
        match Normal::new(0.0, sigma) {
            Ok(dist) if sigma > 0.0 => (0..n).map(|_| dist.sample(&mut self.rng)).collect(),
            _ => vec![0.0; n],
        }
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::with_default_seed()
    }
}
