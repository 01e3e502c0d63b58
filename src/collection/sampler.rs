use super::Band;

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp1};
use rand_pcg::Pcg64;
use std::fmt::Debug;

/// Source of the random deviates a collection run draws.
///
/// Sampling never fails: bands are checked once by [`Config::validate()`] before a run starts.
///
/// [`Config::validate()`]: super::Config::validate
pub trait Sampler: Debug {
    /// A uniform deviate in `band.low..=band.high`.
    fn uniform(&mut self, band: Band) -> f64;

    /// An exponential deviate with the given mean.
    fn exponential(&mut self, mean: f64) -> f64;

    /// Sum of `count` independent uniform deviates from `band`.
    fn uniform_sum(&mut self, band: Band, count: u32) -> f64 {
        (0..count).map(|_| self.uniform(band)).sum()
    }
}

/// [`Sampler`] backed by a PCG-64 stream.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: Pcg64,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Seeded from the thread-local generator, itself seeded by the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg64::from_rng(&mut rand::rng()),
        }
    }

    /// [`from_seed()`](Self::from_seed) when a seed is given, [`from_entropy()`](Self::from_entropy) otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl Sampler for RandomSource {
    fn uniform(&mut self, band: Band) -> f64 {
        self.rng.random_range(band.low..=band.high)
    }

    fn exponential(&mut self, mean: f64) -> f64 {
        let unit: f64 = Exp1.sample(&mut self.rng);
        unit * mean
    }
}
