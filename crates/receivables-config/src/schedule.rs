//! Schedule construction settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use receivables_core::calendars::{Calendar, HolidayCalendar, DEFAULT_MAX_ROLLOVER_DAYS};
use receivables_core::types::Date;
use receivables_schedule::builder::DEFAULT_PARALLEL_THRESHOLD;
use receivables_schedule::{FeePolicy, ScheduleBuilder, ScheduleOptions};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Smallest accepted rollover limit: a weekend plus a holiday week.
pub const MIN_ROLLOVER_DAYS: u32 = 7;

/// Largest accepted rollover limit: ten years.
pub const MAX_ROLLOVER_DAYS: u32 = 3660;

/// Settings for building receivables schedules.
///
/// Every field has a default, so an empty document is a valid configuration:
///
/// ```toml
/// fee_policy = "fixed-table"
/// include_transaction_date = true
/// max_rollover_days = 366
/// holidays_file = "holidays.json"
/// holidays = ["2024-12-25"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Anticipation fee rule.
    #[serde(default)]
    pub fee_policy: FeePolicy,

    /// Whether schedules carry `transaction_date`.
    #[serde(default = "default_true")]
    pub include_transaction_date: bool,

    /// Maximum days a due date may roll forward.
    #[serde(default = "default_max_rollover_days")]
    pub max_rollover_days: u32,

    /// JSON holiday file (document or bare array of dates).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays_file: Option<PathBuf>,

    /// Extra holidays in YYYY-MM-DD format.
    #[serde(default)]
    pub holidays: Vec<String>,

    /// Allow parallel batch processing.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum batch size for parallel processing.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_rollover_days() -> u32 {
    DEFAULT_MAX_ROLLOVER_DAYS
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            fee_policy: FeePolicy::default(),
            include_transaction_date: true,
            max_rollover_days: DEFAULT_MAX_ROLLOVER_DAYS,
            holidays_file: None,
            holidays: Vec::new(),
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ScheduleConfig {
    /// Sets the fee policy.
    pub fn with_fee_policy(mut self, policy: FeePolicy) -> Self {
        self.fee_policy = policy;
        self
    }

    /// Sets whether `transaction_date` is emitted.
    pub fn with_transaction_date(mut self, include: bool) -> Self {
        self.include_transaction_date = include;
        self
    }

    /// Sets the rollover limit.
    pub fn with_max_rollover_days(mut self, days: u32) -> Self {
        self.max_rollover_days = days;
        self
    }

    /// Sets the holiday file.
    pub fn with_holidays_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.holidays_file = Some(path.into());
        self
    }

    /// Adds an inline holiday.
    pub fn with_holiday(mut self, date: impl Into<String>) -> Self {
        self.holidays.push(date.into());
        self
    }

    /// Schedule builder options derived from this configuration.
    pub fn to_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            include_transaction_date: self.include_transaction_date,
            max_rollover_days: self.max_rollover_days,
            parallel: self.parallel,
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// Loads the holiday calendar: the holiday file, if any, merged with the
    /// inline holidays.
    ///
    /// A relative `holidays_file` is resolved against `base_dir` when given.
    pub fn load_calendar(&self, base_dir: Option<&Path>) -> ConfigResult<HolidayCalendar> {
        let mut calendar = match &self.holidays_file {
            Some(path) => {
                let resolved = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                HolidayCalendar::from_json_file(&resolved)?
            }
            None => HolidayCalendar::empty(),
        };

        for (i, text) in self.holidays.iter().enumerate() {
            let date = Date::parse(text).map_err(|_| ConfigError::Validation {
                field: format!("holidays[{}]", i),
                message: format!("'{}' is not a YYYY-MM-DD date", text),
            })?;
            calendar.add_holiday(date);
        }

        log::debug!(
            "holiday calendar '{}' with {} date(s)",
            calendar.name(),
            calendar.holiday_count()
        );
        Ok(calendar)
    }

    /// Validates this configuration and assembles a schedule builder.
    pub fn builder(&self, base_dir: Option<&Path>) -> ConfigResult<ScheduleBuilder> {
        self.validate_or_error()?;
        let calendar = self.load_calendar(base_dir)?;
        Ok(ScheduleBuilder::new()
            .with_calendar(calendar)
            .with_fee_policy(self.fee_policy)
            .with_options(self.to_options()))
    }
}

impl Validate for ScheduleConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(MIN_ROLLOVER_DAYS..=MAX_ROLLOVER_DAYS).contains(&self.max_rollover_days) {
            errors.push(ValidationError::with_rule(
                "max_rollover_days",
                format!(
                    "Rollover limit must be between {} and {} days",
                    MIN_ROLLOVER_DAYS, MAX_ROLLOVER_DAYS
                ),
                "valid_rollover_days",
            ));
        }

        if self.parallel_threshold == 0 {
            errors.push(ValidationError::with_rule(
                "parallel_threshold",
                "Parallel threshold must be positive",
                "positive_threshold",
            ));
        }

        if let Some(path) = &self.holidays_file {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "holidays_file",
                    "Holiday file path cannot be empty",
                ));
            }
        }

        for (i, text) in self.holidays.iter().enumerate() {
            if Date::parse(text).is_err() {
                errors.push(ValidationError::with_rule(
                    format!("holidays[{}]", i),
                    format!("'{}' is not a YYYY-MM-DD date", text),
                    "iso_date",
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receivables_schedule::FeeSchedule;

    #[test]
    fn test_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.fee_policy, FeePolicy::FixedTable);
        assert!(config.include_transaction_date);
        assert_eq!(config.max_rollover_days, 366);
        assert!(config.is_valid());
        assert_eq!(config.to_options(), ScheduleOptions::default());
    }

    #[test]
    fn test_validation() {
        let mut config = ScheduleConfig::default().with_max_rollover_days(3);
        assert!(!config.is_valid());

        config.max_rollover_days = 30;
        config.parallel_threshold = 0;
        assert!(!config.is_valid());

        config.parallel_threshold = 10;
        config.holidays = vec!["2024-12-25".to_string(), "25/12/2024".to_string()];
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "holidays[1]");
    }

    #[test]
    fn test_inline_holidays() {
        let config = ScheduleConfig::default()
            .with_holiday("2024-12-25")
            .with_holiday("2025-01-01");
        let calendar = config.load_calendar(None).unwrap();
        assert_eq!(calendar.holiday_count(), 2);
        assert!(!calendar.is_business_day(Date::from_ymd(2024, 12, 25).unwrap()));
    }

    #[test]
    fn test_builder_uses_settings() {
        let config = ScheduleConfig::default()
            .with_fee_policy(FeePolicy::Linear)
            .with_transaction_date(false);
        let builder = config.builder(None).unwrap();
        assert_eq!(builder.fee_schedule().name(), "Linear");
        assert!(!builder.options().include_transaction_date);
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let config = ScheduleConfig::default().with_holiday("soon");
        assert!(matches!(
            config.builder(None),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_missing_holiday_file() {
        let config = ScheduleConfig::default().with_holidays_file("/nonexistent/holidays.json");
        assert!(matches!(
            config.load_calendar(None),
            Err(ConfigError::Calendar(_))
        ));
    }
}
