//! Deterministic random number generation for round setup.
//!
//! Deals are driven by an explicit seed rather than thread-local
//! randomness, so a deal can be reproduced. The same seed always produces
//! the same deal.
//!
//! ```
//! use paired_session::core::RoundRng;
//!
//! let mut a = RoundRng::new(42);
//! let mut b = RoundRng::new(42);
//!
//! let mut left = [1, 2, 3, 4, 5, 6, 7, 8];
//! let mut right = left;
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used to deal round content.
///
/// Uses ChaCha8 so the sequence is stable across platforms.
#[derive(Clone, Debug)]
pub struct RoundRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl RoundRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
