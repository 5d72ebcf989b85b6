//! Worker-count configuration.
//!
//! A range computation takes its worker count from an explicit
//! [`ThreadConfig`] when given one, and otherwise from a snapshot of the
//! process-wide setting taken at the start of the call. The process-wide
//! setting sits behind a `RwLock` that is only held for the read or write
//! itself, never across a computation, so changing it while a range is in
//! flight affects only later calls.

use std::num::NonZeroUsize;

use parking_lot::RwLock;
use tracing::debug;

use fastfib_core::calculator::FibError;

/// `None` means "use the hardware parallelism".
static WORKER_COUNT: RwLock<Option<NonZeroUsize>> = parking_lot::const_rwlock(None);

/// Number of worker threads used by a range computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadConfig {
    workers: NonZeroUsize,
}

impl ThreadConfig {
    /// Create a config with exactly `workers` threads.
    pub fn new(workers: usize) -> Result<Self, FibError> {
        NonZeroUsize::new(workers)
            .map(|workers| Self { workers })
            .ok_or_else(|| FibError::InvalidArgument("number of threads must be positive".into()))
    }

    /// One worker per available hardware thread (1 if that cannot be determined).
    #[must_use]
    pub fn hardware() -> Self {
        Self {
            workers: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Snapshot of the process-wide setting.
    #[must_use]
    pub fn global() -> Self {
        let configured = *WORKER_COUNT.read();
        configured.map_or_else(Self::hardware, |workers| Self { workers })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers.get()
    }
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self::global()
    }
}

/// Current process-wide worker count.
#[must_use]
pub fn worker_count() -> usize {
    ThreadConfig::global().workers()
}

/// Set the process-wide worker count. Zero is rejected.
pub fn set_worker_count(workers: usize) -> Result<(), FibError> {
    let config = ThreadConfig::new(workers)?;
    *WORKER_COUNT.write() = Some(config.workers);
    debug!(workers, "worker count set");
    Ok(())
}

/// Return the process-wide worker count to the hardware default.
pub fn reset_worker_count() {
    *WORKER_COUNT.write() = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero() {
        assert!(matches!(
            ThreadConfig::new(0),
            Err(FibError::InvalidArgument(_))
        ));
        assert_eq!(ThreadConfig::new(3).unwrap().workers(), 3);
    }

    #[test]
    fn hardware_is_positive() {
        assert!(ThreadConfig::hardware().workers() >= 1);
    }

    // The only test in this crate that touches the process-wide setting.
    #[test]
    fn global_setter_roundtrip() {
        set_worker_count(5).unwrap();
        assert_eq!(worker_count(), 5);
        assert_eq!(ThreadConfig::global().workers(), 5);

        assert!(set_worker_count(0).is_err());
        assert_eq!(worker_count(), 5);

        reset_worker_count();
        assert_eq!(worker_count(), ThreadConfig::hardware().workers());
    }
}
