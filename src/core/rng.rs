//! Deterministic random number generation for table operations.
//!
//! Each `TableEnvironment` owns one `TableRng`, seeded from its
//! configuration, so shuffles replay identically for the same seed and
//! the same sequence of operations.
//!
//! ```
//! use rust_tabletop::core::TableRng;
//!
//! let mut a = TableRng::new(7);
//! let mut b = TableRng::new(7);
//! let mut x = vec![1, 2, 3, 4, 5, 6];
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct TableRng {
    inner: ChaCha8Rng,
}

impl TableRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
