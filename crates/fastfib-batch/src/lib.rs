//! # fastfib-batch
//!
//! Parallel evaluation of contiguous Fibonacci ranges, worker-count
//! configuration, and range partitioning.

pub mod config;
pub mod evaluator;
pub mod partition;

pub use config::{reset_worker_count, set_worker_count, worker_count, ThreadConfig};
pub use evaluator::{compute_range, BatchOptions, RangeEvaluator, RangeMode, RangeRequest};
pub use partition::{partition, PartitionStrategy};
