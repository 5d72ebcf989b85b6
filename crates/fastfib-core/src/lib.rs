//! # fastfib-core
//!
//! Exact Fibonacci numbers for arbitrarily large indices. Implements the
//! Fast Doubling kernel over arbitrary-precision integers, exact digit
//! counts, and the error taxonomy shared by the batch evaluator.

pub mod approx;
pub mod calculator;
pub mod constants;
pub mod digits;
pub mod fastdoubling;
pub mod index;
pub mod iterator;
pub mod options;
pub(crate) mod pool;

#[cfg(feature = "gmp")]
pub mod calculator_gmp;

// Re-exports
pub use calculator::{Calculator, CoreCalculator, FibCalculator, FibError};
pub use constants::{exit_codes, DEFAULT_MAX_DIGITS, DEFAULT_PARALLEL_THRESHOLD, FIB_TABLE};
pub use index::IntoIndex;
pub use iterator::FibIterator;
pub use options::Options;

use num_bigint::BigUint;

/// Exact Fibonacci value. Owned by the caller; never cached or shared.
pub type FibValue = BigUint;

/// Compute F(n) using the fast doubling algorithm with default options.
///
/// Fails with [`FibError::InvalidArgument`] for a negative index and with
/// [`FibError::OversizedResult`] when F(n) would exceed
/// [`DEFAULT_MAX_DIGITS`] digits.
///
/// # Example
/// ```
/// assert_eq!(fastfib_core::fibonacci(10).unwrap().to_string(), "55");
/// assert_eq!(fastfib_core::fibonacci(0).unwrap().to_string(), "0");
/// assert!(fastfib_core::fibonacci(-1).is_err());
/// ```
pub fn fibonacci(n: impl IntoIndex) -> Result<FibValue, FibError> {
    FibCalculator::default().calculate(n.into_index()?, &Options::default())
}

/// Compute `(F(n), F(n+1))` directly from the doubling kernel.
pub fn fibonacci_pair(n: impl IntoIndex) -> Result<(FibValue, FibValue), FibError> {
    FibCalculator::default().calculate_pair(n.into_index()?, &Options::default())
}

/// Exact number of decimal digits of F(n), without computing F(n).
pub fn digit_count(n: impl IntoIndex) -> Result<u64, FibError> {
    Ok(digits::digit_count(n.into_index()?))
}
