//! Holiday-set calendar loaded at runtime.
//!
//! Holidays are data, not rules: the calendar is a set of dates supplied by
//! the caller, programmatically or from JSON.
//!
//! # Example
//!
//! ```
//! use receivables_core::calendars::{Calendar, HolidayCalendar};
//! use receivables_core::types::Date;
//!
//! let holidays = vec![
//!     Date::from_ymd(2024, 12, 25).unwrap(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//! ];
//! let cal = HolidayCalendar::from_dates("B3", holidays);
//!
//! assert!(!cal.is_business_day(Date::from_ymd(2024, 12, 25).unwrap()));
//! assert!(cal.is_business_day(Date::from_ymd(2024, 12, 26).unwrap()));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

const DEFAULT_NAME: &str = "Holidays";

/// A weekend calendar extended with an explicit set of holiday dates.
///
/// With no holidays it behaves exactly like
/// [`WeekendCalendar`](super::WeekendCalendar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::empty()
    }
}

impl HolidayCalendar {
    /// Create a new calendar with no holidays.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: BTreeSet::new(),
        }
    }

    /// Create an unnamed calendar with no holidays.
    pub fn empty() -> Self {
        Self::new(DEFAULT_NAME)
    }

    /// Create a calendar from a list of holiday dates.
    pub fn from_dates(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        let mut cal = Self::new(name);
        cal.add_holidays(holidays);
        cal
    }

    /// Load a calendar from JSON data.
    ///
    /// Accepts either a calendar document or a bare array of dates:
    ///
    /// ```json
    /// { "name": "B3", "holidays": ["2024-12-25", "2025-01-01"] }
    /// ```
    ///
    /// ```json
    /// ["2024-12-25", "2025-01-01"]
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let source: HolidaySource = serde_json::from_str(json)
            .map_err(|e| CoreError::calendar(format!("Failed to parse JSON: {}", e)))?;
        let data = match source {
            HolidaySource::Document(data) => data,
            HolidaySource::Dates(holidays) => CalendarData {
                name: DEFAULT_NAME.to_string(),
                holidays,
            },
        };
        Self::from_calendar_data(data)
    }

    /// Load a calendar from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::calendar(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let cal = Self::from_json(&content)?;
        log::debug!(
            "loaded {} holidays from {}",
            cal.holiday_count(),
            path.display()
        );
        Ok(cal)
    }

    /// Build a calendar from already deserialized data.
    pub fn from_calendar_data(data: CalendarData) -> CoreResult<Self> {
        let mut cal = Self::new(data.name);
        for date_str in &data.holidays {
            let date = Date::parse(date_str)
                .map_err(|_| CoreError::calendar(format!("Invalid holiday date '{}'", date_str)))?;
            cal.add_holiday(date);
        }
        Ok(cal)
    }

    /// Add a holiday date.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays.
    pub fn add_holidays(&mut self, dates: impl IntoIterator<Item = Date>) {
        self.holidays.extend(dates);
    }

    /// Remove a holiday date.
    pub fn remove_holiday(&mut self, date: Date) {
        self.holidays.remove(&date);
    }

    /// Merge holidays from another calendar.
    pub fn merge(&mut self, other: &HolidayCalendar) {
        self.holidays.extend(other.holidays.iter().copied());
    }

    /// Check if a date is in the holiday set (weekends not included).
    pub fn contains(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    /// Count holidays in this calendar.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    /// Holidays in ascending order.
    pub fn holidays(&self) -> impl Iterator<Item = Date> + '_ {
        self.holidays.iter().copied()
    }

    /// Export calendar data to a serializable struct.
    pub fn to_calendar_data(&self) -> CalendarData {
        CalendarData {
            name: self.name.clone(),
            holidays: self.holidays.iter().map(ToString::to_string).collect(),
        }
    }

    /// Export to a JSON string.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(&self.to_calendar_data())
            .map_err(|e| CoreError::calendar(format!("Failed to serialize calendar: {}", e)))
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday() && !self.holidays.contains(&date)
    }
}

/// Calendar data structure for JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarData {
    /// Name of the calendar
    #[serde(default = "default_name")]
    pub name: String,

    /// List of holiday dates in YYYY-MM-DD format
    #[serde(default)]
    pub holidays: Vec<String>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl CalendarData {
    /// Create a new CalendarData.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: Vec::new(),
        }
    }

    /// Add a holiday date string.
    pub fn with_holiday(mut self, date: &str) -> Self {
        self.holidays.push(date.to_string());
        self
    }

    /// Build into a HolidayCalendar.
    pub fn build(self) -> CoreResult<HolidayCalendar> {
        HolidayCalendar::from_calendar_data(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HolidaySource {
    Document(CalendarData),
    Dates(Vec<String>),
}
