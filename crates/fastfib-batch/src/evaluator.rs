//! Parallel evaluation of F(start..=end).
//!
//! The output vector is allocated up front and split into disjoint mutable
//! chunks, one per sub-range of the partition. Each chunk is filled by its
//! own task on a thread pool built for this call alone; the call returns
//! only after every task has finished. Because every slot is written by
//! exactly one task at a fixed position, the result is in index order and is
//! the same for any worker count.

use std::ops::RangeInclusive;
use std::sync::Arc;

use num_bigint::BigUint;
use rayon::prelude::*;
use tracing::debug;

use fastfib_core::calculator::{Calculator, FibCalculator, FibError};
use fastfib_core::digits::{digit_count, estimated_bits, first_oversized};
use fastfib_core::index::IntoIndex;
use fastfib_core::iterator::FibIterator;
use fastfib_core::options::Options;

use crate::config::ThreadConfig;
use crate::partition::{partition, PartitionStrategy};

/// A validated inclusive index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    start: u64,
    end: u64,
}

impl RangeRequest {
    /// Validate `start..=end`. Both must be non-negative and `start <= end`.
    pub fn new(start: impl IntoIndex, end: impl IntoIndex) -> Result<Self, FibError> {
        let start = start.into_index()?;
        let end = end.into_index()?;
        if start > end {
            return Err(FibError::InvalidArgument(format!(
                "start must be <= end, got {start}..={end}"
            )));
        }
        if usize::try_from(end - start).map_or(true, |span| span == usize::MAX) {
            return Err(FibError::InvalidArgument(format!(
                "range {start}..={end} has too many elements"
            )));
        }
        Ok(Self { start, end })
    }

    /// First index.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last index (inclusive).
    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of results, `end - start + 1`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn len(&self) -> usize {
        // Checked against usize::MAX in `new`.
        (self.end - self.start) as usize + 1
    }

    /// Always false: a request holds at least one index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// How a worker fills its sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Seed `(F(a), F(a+1))` with one kernel call, then add.
    #[default]
    Incremental,
    /// One kernel call per index.
    Independent,
}

/// Options for a range computation.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker count; `None` reads the process-wide setting at call start.
    pub threads: Option<ThreadConfig>,
    /// How the range is split between workers.
    pub partition: PartitionStrategy,
    /// How each worker fills its sub-range.
    pub mode: RangeMode,
    /// Kernel options, including the digit ceiling.
    pub core: Options,
}

/// Computes contiguous ranges of Fibonacci numbers on a per-call worker pool.
pub struct RangeEvaluator {
    calculator: Arc<dyn Calculator>,
    opts: BatchOptions,
}

impl RangeEvaluator {
    /// Create an evaluator backed by the default fast doubling calculator.
    #[must_use]
    pub fn new(opts: BatchOptions) -> Self {
        Self::with_calculator(Arc::new(FibCalculator::default()), opts)
    }

    /// Create an evaluator backed by the given calculator.
    #[must_use]
    pub fn with_calculator(calculator: Arc<dyn Calculator>, opts: BatchOptions) -> Self {
        Self { calculator, opts }
    }

    /// Compute `[F(start), ..., F(end)]`.
    ///
    /// Fails with [`FibError::OversizedResult`] naming the first index past
    /// the digit ceiling before any work starts. If a worker fails, the
    /// failure with the lowest index is returned and all partial results are
    /// dropped.
    pub fn evaluate(&self, request: &RangeRequest) -> Result<Vec<BigUint>, FibError> {
        let (start, end) = (request.start(), request.end());
        let threads = self.opts.threads.unwrap_or_else(ThreadConfig::global);

        if let Some(limit) = self.opts.core.max_digits {
            if let Some(index) = first_oversized(start, end, limit) {
                return Err(FibError::OversizedResult {
                    index,
                    digits: digit_count(index),
                    limit,
                });
            }
        }

        let ranges = partition(start, end, threads.workers(), self.opts.partition);
        debug!(
            start,
            end,
            workers = threads.workers(),
            parts = ranges.len(),
            max_bits = estimated_bits(end),
            mode = ?self.opts.mode,
            calculator = self.calculator.name(),
            "evaluating range"
        );

        let mut slots = vec![BigUint::ZERO; request.len()];
        let mut chunks = Vec::with_capacity(ranges.len());
        let mut rest = slots.as_mut_slice();
        for range in ranges {
            #[allow(clippy::cast_possible_truncation)]
            let size = (range.end() - range.start()) as usize + 1;
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(size);
            chunks.push((range, head));
            rest = tail;
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.workers())
            .thread_name(|i| format!("fastfib-worker-{i}"))
            .build()
            .map_err(|e| FibError::Config(format!("failed to build worker pool: {e}")))?;

        let outcomes: Vec<Result<(), FibError>> = pool.install(|| {
            chunks
                .into_par_iter()
                .map(|(range, out)| self.fill(range, out))
                .collect()
        });

        // Chunks are in index order, so the first error has the lowest index.
        outcomes.into_iter().collect::<Result<(), FibError>>()?;
        Ok(slots)
    }

    fn fill(&self, range: RangeInclusive<u64>, out: &mut [BigUint]) -> Result<(), FibError> {
        let core = &self.opts.core;
        match self.opts.mode {
            RangeMode::Incremental => {
                let first = *range.start();
                // A seed pair reaches one index past its sub-range, which may
                // sit past the ceiling when the sub-range is a single index.
                if out.len() == 1 {
                    out[0] = self.calculator.calculate(first, core)?;
                    return Ok(());
                }
                let (fa, fa1) = self.calculator.calculate_pair(first, core)?;
                for (slot, (_, value)) in out.iter_mut().zip(FibIterator::from_pair(first, fa, fa1))
                {
                    *slot = value;
                }
            }
            RangeMode::Independent => {
                for (slot, n) in out.iter_mut().zip(range) {
                    *slot = self.calculator.calculate(n, core)?;
                }
            }
        }
        Ok(())
    }
}

/// Compute `[F(start), ..., F(end)]` on `threads` workers with default options.
pub fn compute_range(
    start: impl IntoIndex,
    end: impl IntoIndex,
    threads: ThreadConfig,
) -> Result<Vec<BigUint>, FibError> {
    let request = RangeRequest::new(start, end)?;
    RangeEvaluator::new(BatchOptions {
        threads: Some(threads),
        ..BatchOptions::default()
    })
    .evaluate(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastfib_core::fibonacci;

    fn opts(workers: usize, partition: PartitionStrategy, mode: RangeMode) -> BatchOptions {
        BatchOptions {
            threads: Some(ThreadConfig::new(workers).unwrap()),
            partition,
            mode,
            core: Options::default(),
        }
    }

    fn to_strings(values: &[BigUint]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn small_range_values() {
        let values = compute_range(10, 15, ThreadConfig::new(2).unwrap()).unwrap();
        assert_eq!(to_strings(&values), ["55", "89", "144", "233", "377", "610"]);
    }

    #[test]
    fn range_from_zero() {
        let values = compute_range(0, 7, ThreadConfig::new(3).unwrap()).unwrap();
        assert_eq!(to_strings(&values), ["0", "1", "1", "2", "3", "5", "8", "13"]);
    }

    #[test]
    fn single_index_range() {
        let values = compute_range(100, 100, ThreadConfig::new(8).unwrap()).unwrap();
        assert_eq!(to_strings(&values), ["354224848179261915075"]);
    }

    #[test]
    fn matches_single_value_calls() {
        let request = RangeRequest::new(80, 400).unwrap();
        for mode in [RangeMode::Incremental, RangeMode::Independent] {
            let values = RangeEvaluator::new(opts(4, PartitionStrategy::WorkWeighted, mode))
                .evaluate(&request)
                .unwrap();
            assert_eq!(values.len(), request.len());
            for (i, value) in values.iter().enumerate() {
                assert_eq!(*value, fibonacci(80 + i as u64).unwrap(), "mode={mode:?} i={i}");
            }
        }
    }

    #[test]
    fn identical_across_workers_modes_and_strategies() {
        let request = RangeRequest::new(1, 2000).unwrap();
        let reference = RangeEvaluator::new(opts(
            1,
            PartitionStrategy::EqualCount,
            RangeMode::Independent,
        ))
        .evaluate(&request)
        .unwrap();

        for workers in [2, 3, 8] {
            for partition in [PartitionStrategy::EqualCount, PartitionStrategy::WorkWeighted] {
                for mode in [RangeMode::Incremental, RangeMode::Independent] {
                    let values = RangeEvaluator::new(opts(workers, partition, mode))
                        .evaluate(&request)
                        .unwrap();
                    assert_eq!(values, reference, "{workers} {partition:?} {mode:?}");
                }
            }
        }
    }

    #[test]
    fn ten_thousand_indices_one_vs_eight_workers() {
        let one = compute_range(1, 10_000, ThreadConfig::new(1).unwrap()).unwrap();
        let eight = compute_range(1, 10_000, ThreadConfig::new(8).unwrap()).unwrap();
        assert_eq!(one.len(), 10_000);
        assert_eq!(one, eight);
    }

    #[test]
    fn range_ending_at_ceiling_is_accepted() {
        // F(97) has 20 digits, F(98) has 21.
        for (workers, start) in [(8, 95), (2, 90), (1, 97)] {
            let mut batch = opts(workers, PartitionStrategy::EqualCount, RangeMode::Incremental);
            batch.core.max_digits = Some(20);
            let values = RangeEvaluator::new(batch)
                .evaluate(&RangeRequest::new(start, 97).unwrap())
                .unwrap();
            assert_eq!(values.last(), Some(&fibonacci(97).unwrap()), "workers={workers}");
            for (i, value) in values.iter().enumerate() {
                assert_eq!(*value, fibonacci(start + i as u64).unwrap());
            }
        }
    }

    #[test]
    fn more_workers_than_indices() {
        let values = compute_range(3, 5, ThreadConfig::new(16).unwrap()).unwrap();
        assert_eq!(to_strings(&values), ["2", "3", "5"]);
    }

    #[test]
    fn request_validation() {
        assert!(matches!(
            RangeRequest::new(5, 1),
            Err(FibError::InvalidArgument(_))
        ));
        assert!(matches!(
            RangeRequest::new(-1, 5),
            Err(FibError::InvalidArgument(_))
        ));
        assert!(matches!(
            RangeRequest::new(0, -3i64),
            Err(FibError::InvalidArgument(_))
        ));
        let request = RangeRequest::new(3, 3).unwrap();
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn oversized_range_names_first_offending_index() {
        let mut batch = opts(4, PartitionStrategy::WorkWeighted, RangeMode::Incremental);
        batch.core.max_digits = Some(20);
        let err = RangeEvaluator::new(batch)
            .evaluate(&RangeRequest::new(90, 120).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            FibError::OversizedResult {
                index: 98,
                digits: 21,
                limit: 20
            }
        );
    }

    struct FailingCalculator {
        inner: FibCalculator,
        fail_at: Vec<u64>,
    }

    impl Calculator for FailingCalculator {
        fn calculate_pair(
            &self,
            n: u64,
            opts: &Options,
        ) -> Result<(BigUint, BigUint), FibError> {
            if self.fail_at.contains(&n) {
                return Err(FibError::OversizedResult {
                    index: n,
                    digits: 0,
                    limit: 0,
                });
            }
            self.inner.calculate_pair(n, opts)
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[test]
    fn worker_failure_reports_lowest_index() {
        let calc = Arc::new(FailingCalculator {
            inner: FibCalculator::default(),
            fail_at: vec![70, 30, 31],
        });
        let evaluator = RangeEvaluator::with_calculator(
            calc,
            opts(4, PartitionStrategy::EqualCount, RangeMode::Independent),
        );
        let err = evaluator
            .evaluate(&RangeRequest::new(0, 99).unwrap())
            .unwrap_err();
        assert!(matches!(err, FibError::OversizedResult { index: 30, .. }));
    }
}
