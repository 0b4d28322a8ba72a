//! Business day calendars and forward rollover.
//!
//! This module provides:
//! - The [`Calendar`] trait with a bounded "following" rollover
//! - [`WeekendCalendar`]: Saturday/Sunday only
//! - [`HolidayCalendar`]: weekends plus an explicit set of holiday dates

mod holiday;

pub use holiday::{CalendarData, HolidayCalendar};

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, PaymentTimestamp};

/// Default number of days the rollover may step before giving up.
///
/// A full year: any holiday set that blocks more than that is malformed.
pub const DEFAULT_MAX_ROLLOVER_DAYS: u32 = 366;

/// Trait for business day calendars.
///
/// A business day is a weekday (Monday to Friday) that the calendar does not
/// mark as a holiday.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is not a business day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the first business day on or after `date`.
    ///
    /// Steps at most [`DEFAULT_MAX_ROLLOVER_DAYS`] days.
    fn next_business_day(&self, date: Date) -> CoreResult<Date> {
        self.next_business_day_within(date, DEFAULT_MAX_ROLLOVER_DAYS)
    }

    /// Returns the first business day on or after `date`, stepping at most
    /// `max_days` days forward.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::BusinessDayResolutionFailed` when every candidate
    /// in the window is a weekend or holiday, and `CoreError::DateOutOfRange`
    /// when the window runs past the end of the calendar.
    fn next_business_day_within(&self, date: Date, max_days: u32) -> CoreResult<Date> {
        let mut candidate = date;
        for _ in 0..max_days {
            if self.is_business_day(candidate) {
                if candidate != date {
                    log::trace!("{}: rolled {} -> {}", self.name(), date, candidate);
                }
                return Ok(candidate);
            }
            candidate = candidate.add_days(1)?;
        }
        if self.is_business_day(candidate) {
            return Ok(candidate);
        }

        log::warn!(
            "{}: no business day within {} days after {}",
            self.name(),
            max_days,
            date
        );
        Err(CoreError::BusinessDayResolutionFailed {
            start: date.to_string(),
            attempts: max_days,
        })
    }

    /// Moves a timestamp forward to the first business day, keeping its time
    /// of day.
    fn advance(&self, timestamp: PaymentTimestamp) -> CoreResult<PaymentTimestamp> {
        self.advance_within(timestamp, DEFAULT_MAX_ROLLOVER_DAYS)
    }

    /// Like [`Calendar::advance`] with an explicit rollover limit.
    fn advance_within(
        &self,
        timestamp: PaymentTimestamp,
        max_days: u32,
    ) -> CoreResult<PaymentTimestamp> {
        let start = timestamp.date();
        let rolled = self.next_business_day_within(start, max_days)?;
        timestamp.add_days(start.days_between(&rolled))
    }
}

/// A simple weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday()
    }
}

impl<C: Calendar + ?Sized> Calendar for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        (**self).is_business_day(date)
    }
}
