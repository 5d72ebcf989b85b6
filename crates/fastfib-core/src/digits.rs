//! Digit counts of F(n) without computing F(n).
//!
//! For n >= 2, F(n) = round(phi^n / sqrt(5)) and F(n) is never a power of ten
//! (other than F(1) = F(2) = 1), so
//!
//!   digits(F(n)) = floor(n * log10(phi) - log10(sqrt(5))) + 1.
//!
//! The logarithms are held in 36-digit fixed point and the product is taken
//! over `BigUint`, which keeps the floor exact for every `u64` index. Indices
//! up to 93 are answered from the precomputed table instead.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::constants::{
    FIB_TABLE, LOG10_PHI_SCALED, LOG10_SQRT5_SCALED, LOG2_PHI, LOG_SCALE, MAX_FIB_U64,
};

/// Exact number of decimal digits of F(n). F(0) = 0 has one digit.
///
/// # Example
/// ```
/// use fastfib_core::digits::digit_count;
/// assert_eq!(digit_count(0), 1);
/// assert_eq!(digit_count(100), 21);
/// assert_eq!(digit_count(1000), 209);
/// ```
#[must_use]
pub fn digit_count(n: u64) -> u64 {
    if n <= MAX_FIB_U64 {
        #[allow(clippy::cast_possible_truncation)]
        let value = FIB_TABLE[n as usize];
        return u64::from(value.checked_ilog10().unwrap_or(0)) + 1;
    }

    let scaled = BigUint::from(n) * LOG10_PHI_SCALED - LOG10_SQRT5_SCALED;
    let log = scaled / LOG_SCALE;
    // n * log10(phi) < 2^64, so the quotient always fits.
    log.to_u64().map_or(u64::MAX, |d| d + 1)
}

/// Smallest index in `start..=end` whose digit count exceeds `limit`.
///
/// Digit counts never decrease with n, so this is a binary search.
#[must_use]
pub fn first_oversized(start: u64, end: u64, limit: u64) -> Option<u64> {
    if start > end || digit_count(end) <= limit {
        return None;
    }
    let (mut lo, mut hi) = (start, end);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if digit_count(mid) > limit {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(lo)
}

/// Approximate bit length of F(n) (`n * log2(phi)`).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn estimated_bits(n: u64) -> u64 {
    (n as f64 * LOG2_PHI).ceil() as u64
}
