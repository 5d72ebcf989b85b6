//! Calculator traits and the `FibCalculator` decorator.
//!
//! `Calculator` is the public trait consumed by the range evaluator.
//! `CoreCalculator` is the internal trait implemented by kernels.
//! `FibCalculator` is a decorator that adds the size ceiling and the fast path (n < 93).
//! Its default kernel is `FastDoubling`, or `GmpFastDoubling` with the `gmp` feature.

use std::sync::Arc;

use num_bigint::BigUint;

use crate::constants::{FIB_TABLE, MAX_FIB_U64};
use crate::digits::digit_count;
use crate::options::Options;

/// Error type for Fibonacci calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// Negative index, reversed range, or an otherwise unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The result would exceed the configured digit ceiling.
    #[error("F({index}) has {digits} digits, exceeding the limit of {limit}")]
    OversizedResult {
        /// Offending index.
        index: u64,
        /// Predicted digit count of F(index).
        digits: u64,
        /// Configured ceiling.
        limit: u64,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Public trait for Fibonacci calculators.
pub trait Calculator: Send + Sync {
    /// Calculate `(F(n), F(n+1))` with the given options.
    fn calculate_pair(&self, n: u64, opts: &Options) -> Result<(BigUint, BigUint), FibError>;

    /// Calculate F(n) with the given options.
    fn calculate(&self, n: u64, opts: &Options) -> Result<BigUint, FibError> {
        self.calculate_pair(n, opts).map(|(fk, _)| fk)
    }

    /// Get the name of this calculator.
    fn name(&self) -> &str;
}

/// Internal trait for kernel implementations.
/// Wrapped by `FibCalculator` which adds the size ceiling and fast path.
pub trait CoreCalculator: Send + Sync {
    /// Compute `(F(n), F(n+1))` for any n. Never fails; limits are the
    /// decorator's concern.
    fn calculate_pair_core(&self, n: u64, opts: &Options) -> (BigUint, BigUint);

    /// Get the name of this kernel.
    fn name(&self) -> &str;
}

/// Decorator that wraps a `CoreCalculator` with the size ceiling and fast path.
#[derive(Clone)]
pub struct FibCalculator {
    inner: Arc<dyn CoreCalculator>,
}

impl FibCalculator {
    /// Create a new `FibCalculator` wrapping the given core calculator.
    #[must_use]
    pub fn new(inner: Arc<dyn CoreCalculator>) -> Self {
        Self { inner }
    }

    /// Reject n when F(n) would exceed `opts.max_digits`.
    pub fn check_ceiling(n: u64, opts: &Options) -> Result<(), FibError> {
        if let Some(limit) = opts.max_digits {
            let digits = digit_count(n);
            if digits > limit {
                return Err(FibError::OversizedResult {
                    index: n,
                    digits,
                    limit,
                });
            }
        }
        Ok(())
    }

    /// Fast path for n < 93, where F(n+1) still fits in a u64.
    #[allow(clippy::cast_possible_truncation)]
    fn calculate_small(n: u64) -> (BigUint, BigUint) {
        let i = n as usize;
        (BigUint::from(FIB_TABLE[i]), BigUint::from(FIB_TABLE[i + 1]))
    }

    fn pair_unchecked(&self, n: u64, opts: &Options) -> (BigUint, BigUint) {
        if n < MAX_FIB_U64 {
            return Self::calculate_small(n);
        }
        self.inner.calculate_pair_core(n, opts)
    }
}

impl Default for FibCalculator {
    #[cfg(not(feature = "gmp"))]
    fn default() -> Self {
        Self::new(Arc::new(crate::fastdoubling::FastDoubling::new()))
    }

    #[cfg(feature = "gmp")]
    fn default() -> Self {
        Self::new(Arc::new(crate::calculator_gmp::GmpFastDoubling::new()))
    }
}

impl Calculator for FibCalculator {
    /// Both F(n) and F(n+1) are held to the ceiling.
    fn calculate_pair(&self, n: u64, opts: &Options) -> Result<(BigUint, BigUint), FibError> {
        let next = n.checked_add(1).ok_or_else(|| {
            FibError::InvalidArgument(format!("F({n}+1) is past the largest index"))
        })?;
        Self::check_ceiling(n, opts)?;
        Self::check_ceiling(next, opts)?;
        Ok(self.pair_unchecked(n, opts))
    }

    fn calculate(&self, n: u64, opts: &Options) -> Result<BigUint, FibError> {
        Self::check_ceiling(n, opts)?;
        Ok(self.pair_unchecked(n, opts).0)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
