//! Error handling and exit codes.

use std::path::PathBuf;

use fastfib_core::calculator::FibError;
use fastfib_core::constants::exit_codes;

/// Errors raised while presenting a result.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Computation failed.
    #[error(transparent)]
    Fib(#[from] FibError),

    /// The output file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The JSON report could not be encoded.
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Map a calculation error to its process exit code.
#[must_use]
pub fn handle_error(err: &FibError) -> i32 {
    match err {
        FibError::InvalidArgument(_) => exit_codes::ERROR_INVALID_ARGUMENT,
        FibError::OversizedResult { .. } => exit_codes::ERROR_OVERSIZED,
        FibError::Config(_) => exit_codes::ERROR_CONFIG,
    }
}

/// Exit code for any error that reached `main`.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(fib) = cause.downcast_ref::<FibError>() {
            return handle_error(fib);
        }
        if let Some(AppError::Fib(fib)) = cause.downcast_ref::<AppError>() {
            return handle_error(fib);
        }
    }
    exit_codes::ERROR_GENERIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&FibError::InvalidArgument("n".into())), 2);
        assert_eq!(
            handle_error(&FibError::OversizedResult {
                index: 1,
                digits: 2,
                limit: 1
            }),
            3
        );
        assert_eq!(handle_error(&FibError::Config("bad".into())), 4);
    }

    #[test]
    fn exit_code_through_anyhow() {
        let err = anyhow::Error::from(FibError::InvalidArgument("x".into()));
        assert_eq!(exit_code(&err), 2);

        let err = anyhow::Error::from(AppError::Fib(FibError::Config("x".into())))
            .context("running range");
        assert_eq!(exit_code(&err), 4);

        let err = anyhow::Error::from(AppError::Io {
            path: "out.txt".into(),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(exit_code(&err), 1);
    }
}
