//! One-call entry points over the core kernel and the range evaluator.
//!
//! Every function takes indices through [`IntoIndex`], so negative values of
//! any signed integer type are rejected with [`FibError::InvalidArgument`]
//! instead of wrapping.

use fastfib_batch::{compute_range, ThreadConfig};
use fastfib_core::calculator::FibError;
use fastfib_core::index::IntoIndex;
use fastfib_core::FibValue;

/// F(n).
///
/// ```
/// assert_eq!(fastfib_lib::fibonacci(12).unwrap().to_string(), "144");
/// ```
pub fn fibonacci(n: impl IntoIndex) -> Result<FibValue, FibError> {
    fastfib_core::fibonacci(n)
}

/// `(F(n), F(n+1))`.
pub fn fibonacci_pair(n: impl IntoIndex) -> Result<(FibValue, FibValue), FibError> {
    fastfib_core::fibonacci_pair(n)
}

/// `[F(start), ..., F(end)]` using the process-wide worker count.
pub fn fibonacci_range(
    start: impl IntoIndex,
    end: impl IntoIndex,
) -> Result<Vec<FibValue>, FibError> {
    compute_range(start, end, ThreadConfig::global())
}

/// `[F(start), ..., F(end)]` on exactly `threads` workers.
pub fn fibonacci_range_with(
    start: impl IntoIndex,
    end: impl IntoIndex,
    threads: ThreadConfig,
) -> Result<Vec<FibValue>, FibError> {
    compute_range(start, end, threads)
}

/// Number of decimal digits of F(n).
pub fn digit_count(n: impl IntoIndex) -> Result<u64, FibError> {
    fastfib_core::digit_count(n)
}

/// Process-wide default worker count for range computations.
#[must_use]
pub fn worker_count() -> usize {
    fastfib_batch::worker_count()
}

/// Set the process-wide default worker count. Zero is rejected.
pub fn set_worker_count(workers: usize) -> Result<(), FibError> {
    fastfib_batch::set_worker_count(workers)
}

/// Number of ways to climb `steps` stairs taking one or two at a time,
/// which is F(steps + 1).
pub fn staircase_ways(steps: impl IntoIndex) -> Result<FibValue, FibError> {
    let steps = steps.into_index()?;
    let n = steps.checked_add(1).ok_or_else(|| {
        FibError::InvalidArgument(format!("step count {steps} is too large"))
    })?;
    fibonacci(n)
}
