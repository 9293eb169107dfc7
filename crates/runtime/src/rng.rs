//! Host-side randomness backed by `rand`.

use combat_core::RngOracle;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// [`RngOracle`] over a `StdRng`, seeded from OS entropy unless a seed is
/// given.
#[derive(Clone, Debug)]
pub struct EntropyRng {
    inner: StdRng,
    seed: Option<u64>,
}

impl EntropyRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Seed this generator was built from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RngOracle for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
