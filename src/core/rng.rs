//! Deterministic random number generation for sampling chance outcomes.
//!
//! The engine itself never draws random numbers: chance nodes expose their
//! outcome distribution and the caller picks. `GameRng` is the caller-side
//! sampler used by playouts, tests and the simulator.
//!
//! ```
//! use rust_doudizhu::core::{ActionId, GameRng};
//!
//! let mut rng = GameRng::new(42);
//! let outcomes = [(ActionId(0), 0.5), (ActionId(1), 0.5)];
//! let picked = rng.sample_outcome(&outcomes).unwrap();
//! assert!(picked == ActionId(0) || picked == ActionId(1));
//!
//! // Forks are deterministic: same seed and fork count, same stream.
//! let mut a = GameRng::new(7).fork();
//! let mut b = GameRng::new(7).fork();
//! assert_eq!(a.gen_range_usize(0..1000), b.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::action::ActionId;

/// Deterministic RNG with forking for independent playout branches.
///
/// Uses ChaCha8 for speed with a reproducible stream per seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent, deterministic branch.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Choose an index with probability proportional to its weight.
    ///
    /// Returns `None` if weights are empty or sum to zero.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            threshold -= weight;
            if threshold < 0.0 {
                return Some(i);
            }
        }

        // Rounding left a sliver past the end: take the last positive weight.
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Sample one chance outcome from `(action, probability)` pairs.
    pub fn sample_outcome(&mut self, outcomes: &[(ActionId, f64)]) -> Option<ActionId> {
        let weights: Vec<f64> = outcomes.iter().map(|&(_, p)| p).collect();
        self.choose_weighted(&weights).map(|i| outcomes[i].0)
    }
}
