//! Error types for schedule construction.

use thiserror::Error;

use receivables_core::CoreError;

/// A specialized Result type for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors that can occur while turning a transaction into a schedule.
///
/// Every variant names the transaction (`nsu`) it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// `payment_date` is not an ISO-8601 timestamp.
    #[error("Transaction {nsu}: invalid payment_date '{value}'")]
    InvalidDateFormat {
        /// Transaction identifier.
        nsu: String,
        /// The rejected payment date.
        value: String,
    },

    /// `product_name` is neither "Débito" nor "Crédito".
    #[error("Transaction {nsu}: unrecognized product '{product_name}' (expected 'Débito' or 'Crédito')")]
    UnrecognizedProductType {
        /// Transaction identifier.
        nsu: String,
        /// The product name as received.
        product_name: String,
    },

    /// `parcels` is outside the supported range.
    #[error("Transaction {nsu}: unsupported installment count {parcels} (supported: {supported})")]
    UnsupportedInstallmentCount {
        /// Transaction identifier.
        nsu: String,
        /// The requested installment count.
        parcels: i64,
        /// Human-readable supported range, e.g. "1-21".
        supported: String,
    },

    /// A required field is absent from the record.
    #[error("Transaction {}: missing required field '{field}'", .nsu.as_deref().unwrap_or("<unknown>"))]
    MissingRequiredField {
        /// Transaction identifier, when the record has one.
        nsu: Option<String>,
        /// Name of the missing field.
        field: &'static str,
    },

    /// No business day was found for a due date.
    #[error("Transaction {nsu}: no business day within {attempts} days after {start}")]
    BusinessDayResolutionFailed {
        /// Transaction identifier.
        nsu: String,
        /// Unadjusted due date (YYYY-MM-DD).
        start: String,
        /// Number of days checked.
        attempts: u32,
    },

    /// A due date falls outside the representable calendar.
    #[error("Transaction {nsu}: due date out of range ({start} shifted by {days} day(s))")]
    DateOutOfRange {
        /// Transaction identifier.
        nsu: String,
        /// Date the shift started from (YYYY-MM-DD).
        start: String,
        /// Requested shift in days.
        days: i64,
    },

    /// A record in the input is not a usable transaction object.
    #[error("Record {index}: {reason}")]
    InvalidRecord {
        /// Zero-based position in the input.
        index: usize,
        /// Description of the problem.
        reason: String,
    },

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(String),

    /// I/O error while reading input.
    #[error("I/O error: {0}")]
    Io(String),

    /// Any other core error.
    #[error("Transaction {nsu}: {source}")]
    Core {
        /// Transaction identifier.
        nsu: String,
        /// Underlying error.
        source: CoreError,
    },
}

impl ScheduleError {
    /// Wraps a core error with the transaction identifier.
    #[must_use]
    pub fn from_core(nsu: impl Into<String>, err: CoreError) -> Self {
        let nsu = nsu.into();
        match err {
            CoreError::BusinessDayResolutionFailed { start, attempts } => {
                Self::BusinessDayResolutionFailed {
                    nsu,
                    start,
                    attempts,
                }
            }
            CoreError::InvalidDateFormat { value } => Self::InvalidDateFormat { nsu, value },
            CoreError::DateOutOfRange { start, days } => Self::DateOutOfRange { nsu, start, days },
            source => Self::Core { nsu, source },
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(nsu: Option<String>, field: &'static str) -> Self {
        Self::MissingRequiredField { nsu, field }
    }

    /// Returns the transaction identifier the error refers to, if any.
    pub fn nsu(&self) -> Option<&str> {
        match self {
            Self::InvalidDateFormat { nsu, .. }
            | Self::UnrecognizedProductType { nsu, .. }
            | Self::UnsupportedInstallmentCount { nsu, .. }
            | Self::BusinessDayResolutionFailed { nsu, .. }
            | Self::DateOutOfRange { nsu, .. }
            | Self::Core { nsu, .. } => Some(nsu),
            Self::MissingRequiredField { nsu, .. } => nsu.as_deref(),
            Self::InvalidRecord { .. } | Self::Json(_) | Self::Io(_) => None,
        }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            ScheduleError::Io(err.to_string())
        } else {
            ScheduleError::Json(err.to_string())
        }
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        ScheduleError::Io(err.to_string())
    }
}
