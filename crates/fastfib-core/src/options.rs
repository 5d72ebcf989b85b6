//! Calculation options and configuration.

use crate::constants::{DEFAULT_MAX_DIGITS, DEFAULT_PARALLEL_THRESHOLD};

/// Options for Fibonacci calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Threshold (in bits) for running the products of a doubling step in parallel.
    pub parallel_threshold: usize,
    /// Ceiling on the decimal digits of a result (`None` = unlimited).
    pub max_digits: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_digits: Some(DEFAULT_MAX_DIGITS),
        }
    }
}

impl Options {
    /// Options with no digit ceiling.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_digits: None,
            ..Self::default()
        }
    }

    /// Normalize options, applying defaults where values are zero.
    ///
    /// A ceiling of `Some(0)` is treated as "unlimited", matching the
    /// command line where `--max-digits 0` disables the check.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.parallel_threshold == 0 {
            self.parallel_threshold = DEFAULT_PARALLEL_THRESHOLD;
        }
        if self.max_digits == Some(0) {
            self.max_digits = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert_eq!(opts.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(opts.max_digits, Some(DEFAULT_MAX_DIGITS));
    }

    #[test]
    fn normalize_zero_values() {
        let opts = Options {
            parallel_threshold: 0,
            max_digits: Some(0),
        };
        let normalized = opts.normalize();
        assert_eq!(normalized.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(normalized.max_digits, None);
    }

    #[test]
    fn unlimited_has_no_ceiling() {
        assert_eq!(Options::unlimited().max_digits, None);
    }
}
