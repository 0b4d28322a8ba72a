//! Error types for the core crate.
//!
//! Errors raised while parsing timestamps, building calendars or rolling
//! dates over non-business days.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A calendar date could not be constructed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A timestamp string is not ISO-8601.
    #[error("Invalid date format: '{value}' is not an ISO-8601 timestamp")]
    InvalidDateFormat {
        /// The rejected input, as received.
        value: String,
    },

    /// Date arithmetic left the representable calendar.
    #[error("Date out of range: {start} shifted by {days} day(s)")]
    DateOutOfRange {
        /// Date the shift started from (YYYY-MM-DD).
        start: String,
        /// Requested shift in days.
        days: i64,
    },

    /// A monetary amount could not be parsed.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// The rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Rolling forward never reached a business day.
    #[error("No business day found within {attempts} days after {start}")]
    BusinessDayResolutionFailed {
        /// Date the rollover started from (YYYY-MM-DD).
        start: String,
        /// Number of consecutive days checked.
        attempts: u32,
    },

    /// Calendar construction or loading error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date format error.
    #[must_use]
    pub fn invalid_date_format(value: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            value: value.into(),
        }
    }

    /// Creates a date out of range error.
    #[must_use]
    pub fn date_out_of_range(start: impl Into<String>, days: i64) -> Self {
        Self::DateOutOfRange {
            start: start.into(),
            days,
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}
