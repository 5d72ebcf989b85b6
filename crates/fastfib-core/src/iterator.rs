//! Lazy Fibonacci iterator using the standard additive recurrence.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::calculator::CoreCalculator;
use crate::fastdoubling::FastDoubling;
use crate::options::Options;

/// Lazy iterator over the Fibonacci sequence.
///
/// Yields `(index, F(index))` pairs starting from F(0), or from any index
/// when seeded through [`FibIterator::from_index`].
///
/// # Example
/// ```
/// use fastfib_core::iterator::FibIterator;
/// let fibs: Vec<_> = FibIterator::new().take(7).map(|(_, v)| v.to_string()).collect();
/// assert_eq!(fibs, ["0", "1", "1", "2", "3", "5", "8"]);
/// ```
pub struct FibIterator {
    a: BigUint,
    b: BigUint,
    index: u64,
}

impl FibIterator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: BigUint::zero(),
            b: BigUint::one(),
            index: 0,
        }
    }

    /// Start iteration at F(n), seeding the pair with one fast-doubling call.
    #[must_use]
    pub fn from_index(n: u64) -> Self {
        let (a, b) = FastDoubling::new().calculate_pair_core(n, &Options::default());
        Self::from_pair(n, a, b)
    }

    /// Start iteration at F(n) from an already computed `(F(n), F(n+1))`.
    #[must_use]
    pub fn from_pair(n: u64, fn0: BigUint, fn1: BigUint) -> Self {
        Self {
            a: fn0,
            b: fn1,
            index: n,
        }
    }
}

impl Default for FibIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FibIterator {
    type Item = (u64, BigUint);

    fn next(&mut self) -> Option<Self::Item> {
        let next = &self.a + &self.b;
        let val = std::mem::replace(&mut self.a, std::mem::replace(&mut self.b, next));
        let idx = self.index;
        self.index += 1;
        Some((idx, val))
    }
}
