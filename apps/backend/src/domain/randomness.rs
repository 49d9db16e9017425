//! Sources of the per-resolution random draws.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::resolution::ResolutionDraws;

/// Supplies the random values consumed by one resolution.
pub trait RandomSource: Send + Sync + fmt::Debug {
    fn draw(&self) -> ResolutionDraws;
}

/// Fresh thread-local randomness on every call. Production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySource;

impl RandomSource for EntropySource {
    fn draw(&self) -> ResolutionDraws {
        let mut rng = rand::rng();
        ResolutionDraws::from_unit(rng.random::<f64>(), rng.random::<f64>())
    }
}

/// Reproducible sequence of draws from a fixed seed.
pub struct SeededSource {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl fmt::Debug for SeededSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededSource")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl RandomSource for SeededSource {
    fn draw(&self) -> ResolutionDraws {
        // A panic mid-draw cannot leave StdRng in an invalid state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        ResolutionDraws::from_unit(rng.random::<f64>(), rng.random::<f64>())
    }
}

/// Always returns the same draws.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    draws: ResolutionDraws,
}

impl FixedSource {
    pub fn new(assistant_factor: f64, public_sentiment_delta: i32) -> Self {
        Self {
            draws: ResolutionDraws {
                assistant_factor,
                public_sentiment_delta,
            },
        }
    }
}

impl RandomSource for FixedSource {
    fn draw(&self) -> ResolutionDraws {
        self.draws
    }
}
