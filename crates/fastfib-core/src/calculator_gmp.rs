//! GMP-backed Fast Doubling kernel using the `rug` crate.
//!
//! Only available when the `gmp` feature is enabled. The loop is the same as
//! [`crate::fastdoubling`]; results are converted back to `BigUint` so callers
//! see a single exact result type whichever backend computed it.

use num_bigint::BigUint;
use rug::integer::Order;
use rug::Integer;
use tracing::debug;

use crate::calculator::CoreCalculator;
use crate::options::Options;

/// Fast Doubling kernel over GMP integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct GmpFastDoubling;

impl GmpFastDoubling {
    /// Create a new `GmpFastDoubling` kernel.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute `(F(n), F(n+1))` as GMP integers.
    #[must_use]
    pub fn pair_gmp(n: u64) -> (Integer, Integer) {
        let num_bits = 64 - n.leading_zeros();
        debug!(n, num_bits, "fast doubling (gmp)");

        let mut fk = Integer::new();
        let mut fk1 = Integer::from(1);
        let mut t = Integer::new();

        for i in (0..num_bits).rev() {
            t.clone_from(&fk1);
            t <<= 1u32;
            t -= &fk;

            let f2k = Integer::from(&fk * &t);
            let f2k1 = Integer::from(fk.square_ref()) + Integer::from(fk1.square_ref());
            fk = f2k;
            fk1 = f2k1;

            if (n >> i) & 1 == 1 {
                std::mem::swap(&mut fk, &mut fk1);
                fk1 += &fk;
            }
        }

        (fk, fk1)
    }

    fn to_biguint(value: &Integer) -> BigUint {
        BigUint::new(value.to_digits::<u32>(Order::Lsf))
    }
}

impl CoreCalculator for GmpFastDoubling {
    fn calculate_pair_core(&self, n: u64, _opts: &Options) -> (BigUint, BigUint) {
        let (fk, fk1) = Self::pair_gmp(n);
        (Self::to_biguint(&fk), Self::to_biguint(&fk1))
    }

    fn name(&self) -> &'static str {
        "FastDoublingGMP"
    }
}
