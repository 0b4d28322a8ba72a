//! CLI command implementations.

pub mod fees;
pub mod schedule;

pub use fees::FeesArgs;
pub use schedule::ScheduleArgs;

use receivables_core::types::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}
