//! Binet's closed form in double precision. NOT EXACT.
//!
//!   F(n) = (phi^n - psi^n) / sqrt(5)
//!
//! O(1), but `f64` carries 53 bits of mantissa, so the rounded result is only
//! correct up to [`BINET_EXACT_LIMIT`] (n = 70). Past that the error grows
//! without bound and past n = 1474 the value overflows to infinity. This
//! module exists for comparison only; its results are machine numbers and
//! never flow into the exact API.

use crate::constants::BINET_EXACT_LIMIT;

/// Approximate F(n) as an `f64`.
#[must_use]
pub fn binet(n: u64) -> f64 {
    let sqrt5 = 5f64.sqrt();
    let phi = (1.0 + sqrt5) / 2.0;
    let psi = (1.0 - sqrt5) / 2.0;
    #[allow(clippy::cast_precision_loss)]
    let exp = n as f64;
    (phi.powf(exp) - psi.powf(exp)) / sqrt5
}

/// Whether [`binet_rounded`] is guaranteed to equal the exact F(n).
#[must_use]
pub fn is_exact(n: u64) -> bool {
    n <= BINET_EXACT_LIMIT
}

/// Binet's formula rounded to the nearest integer, for the indices where
/// that is still the exact answer.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn binet_rounded(n: u64) -> Option<u64> {
    is_exact(n).then(|| binet(n).round() as u64)
}
