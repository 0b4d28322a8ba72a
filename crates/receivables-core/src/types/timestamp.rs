//! Payment timestamps parsed from ISO-8601 strings.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

use super::date::shift_days;
use super::Date;
use crate::error::{CoreError, CoreResult};

const SEPARATORS: [char; 2] = ['T', ' '];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];
const OFFSET_FORMATS: [&str; 2] = ["%:z", "%z"];

/// The instant a transaction was paid, as written by the processor.
///
/// Keeps the wall-clock time local to whatever offset the string carried.
/// No timezone conversion happens: all schedule arithmetic uses the calendar
/// date of that local time.
///
/// # Example
///
/// ```rust
/// use receivables_core::types::PaymentTimestamp;
///
/// let zulu = PaymentTimestamp::parse("2024-01-02T00:00:00Z").unwrap();
/// let explicit = PaymentTimestamp::parse("2024-01-02T00:00:00+00:00").unwrap();
/// assert_eq!(zulu, explicit);
/// assert_eq!(zulu.date().to_string(), "2024-01-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentTimestamp {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl PaymentTimestamp {
    /// Parses an ISO-8601 timestamp.
    ///
    /// A trailing `Z` is read as `+00:00`. Accepted shapes are a bare date,
    /// or a date and `HH:MM[:SS[.fff]]` time joined by `T` or a space, with
    /// an optional `±HH:MM` offset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDateFormat` carrying the original input.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let normalized = match input.strip_suffix('Z') {
            Some(head) => format!("{head}+00:00"),
            None => input.to_string(),
        };

        for sep in SEPARATORS {
            for time in TIME_FORMATS {
                for offset in OFFSET_FORMATS {
                    let fmt = format!("%Y-%m-%d{sep}{time}{offset}");
                    if let Ok(parsed) = DateTime::parse_from_str(&normalized, &fmt) {
                        return Ok(Self {
                            local: parsed.naive_local(),
                            offset: Some(*parsed.offset()),
                        });
                    }
                }

                let fmt = format!("%Y-%m-%d{sep}{time}");
                if let Ok(local) = NaiveDateTime::parse_from_str(&normalized, &fmt) {
                    return Ok(Self {
                        local,
                        offset: None,
                    });
                }
            }
        }

        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|local| Self {
                local,
                offset: None,
            })
            .ok_or_else(|| CoreError::invalid_date_format(input))
    }

    /// Returns the calendar date component.
    #[must_use]
    pub fn date(&self) -> Date {
        Date::from(self.local.date())
    }

    /// Returns the local wall-clock date and time.
    #[must_use]
    pub fn naive_local(&self) -> NaiveDateTime {
        self.local
    }

    /// Returns the UTC offset, if the input carried one.
    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Adds calendar days, keeping the time of day and offset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DateOutOfRange` if the result falls outside the
    /// representable calendar.
    pub fn add_days(&self, days: i64) -> CoreResult<Self> {
        let date = shift_days(self.local.date(), days)
            .ok_or_else(|| CoreError::date_out_of_range(self.date().to_string(), days))?;
        Ok(Self {
            local: date.and_time(self.local.time()),
            offset: self.offset,
        })
    }
}

impl FromStr for PaymentTimestamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PaymentTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%dT%H:%M:%S%.f"))?;
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}
