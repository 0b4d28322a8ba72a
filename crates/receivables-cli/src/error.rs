//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Input file missing or unreadable.
    #[error("Cannot read {path}: {message}")]
    Input {
        /// Path as given on the command line.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// Some transactions could not be scheduled.
    #[error("{failed} of {total} transaction(s) failed")]
    PartialFailure {
        /// Number of failed transactions.
        failed: usize,
        /// Number of transactions in the input.
        total: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
