//! File-based configuration tests.

use std::fs;

use proptest::prelude::*;
use receivables_config::{ConfigError, ScheduleConfig, Validate};
use receivables_core::calendars::Calendar;
use receivables_core::types::Date;
use receivables_schedule::{FeePolicy, Transaction};

#[test]
fn toml_file_with_relative_holiday_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("holidays.json"),
        r#"{"name": "Local", "holidays": ["2024-03-04"]}"#,
    )
    .unwrap();
    let config_path = dir.path().join("receivables.toml");
    fs::write(
        &config_path,
        r#"
        fee_policy = "fixed-table"
        holidays_file = "holidays.json"
        holidays = ["2024-03-05"]
        "#,
    )
    .unwrap();

    let config = ScheduleConfig::from_file(&config_path).unwrap();
    let builder = config.builder(Some(dir.path())).unwrap();
    assert_eq!(builder.calendar().name(), "Local");
    assert_eq!(builder.calendar().holiday_count(), 2);

    // Friday debit: Monday and Tuesday are holidays
    let tx = Transaction::new("1", "Aprovada", "Visa", "Débito", "2024-03-01T00:00:00Z", 5000);
    let schedule = builder.build(&tx).unwrap();
    assert_eq!(
        schedule.original_installments[0].due_date,
        Date::from_ymd(2024, 3, 6).unwrap()
    );
}

#[test]
fn json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receivables.json");
    fs::write(&path, r#"{"fee_policy": "linear", "include_transaction_date": false}"#).unwrap();

    let config = ScheduleConfig::from_file(&path).unwrap();
    assert_eq!(config.fee_policy, FeePolicy::Linear);
    assert!(!config.include_transaction_date);
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "max_rollover_days = 1\nholidays = [\"tomorrow\"]\n").unwrap();

    let err = ScheduleConfig::from_file(&path).unwrap_err();
    match err {
        ConfigError::MultipleValidationErrors(errors) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["max_rollover_days", "holidays[0]"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file() {
    let err = ScheduleConfig::from_file("/nonexistent/receivables.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

proptest! {
    #[test]
    fn rollover_limit_validation(days in 0u32..10_000) {
        let config = ScheduleConfig::default().with_max_rollover_days(days);
        prop_assert_eq!(config.is_valid(), (7..=3660).contains(&days));
    }

    #[test]
    fn json_round_trip(days in 7u32..=3660, include in any::<bool>(), linear in any::<bool>()) {
        let policy = if linear { FeePolicy::Linear } else { FeePolicy::FixedTable };
        let config = ScheduleConfig::default()
            .with_max_rollover_days(days)
            .with_transaction_date(include)
            .with_fee_policy(policy);
        let text = config.to_json_string().unwrap();
        prop_assert_eq!(ScheduleConfig::from_json_str(&text).unwrap(), config);
    }
}
