//! Property-based tests for business-day rollover.
//!
//! - The rolled date is a weekday outside the holiday set
//! - It is never earlier than the start date
//! - No business day is skipped on the way
//! - Day shifts of any size return a value or an error

use proptest::prelude::*;
use receivables_core::calendars::{Calendar, HolidayCalendar, WeekendCalendar};
use receivables_core::types::{Date, PaymentTimestamp};

fn base() -> Date {
    Date::from_ymd(2024, 1, 1).unwrap()
}

fn at(offset: i64) -> Date {
    base().add_days(offset).unwrap()
}

fn calendar_from_offsets(offsets: &[i64]) -> HolidayCalendar {
    HolidayCalendar::from_dates("Generated", offsets.iter().map(|o| at(*o)))
}

proptest! {
    #[test]
    fn rolled_date_is_first_business_day(
        start in 0i64..730,
        offsets in proptest::collection::vec(0i64..760, 0..120),
    ) {
        let cal = calendar_from_offsets(&offsets);
        let from = at(start);
        let rolled = cal.next_business_day(from).unwrap();

        prop_assert!(rolled >= from);
        prop_assert!(rolled.is_weekday());
        prop_assert!(!cal.contains(rolled));

        let mut day = from;
        while day < rolled {
            prop_assert!(!cal.is_business_day(day));
            day = day.add_days(1).unwrap();
        }
    }

    #[test]
    fn empty_holiday_set_is_weekend_rule(start in 0i64..3650) {
        let from = at(start);
        prop_assert_eq!(
            HolidayCalendar::empty().next_business_day(from).unwrap(),
            WeekendCalendar.next_business_day(from).unwrap()
        );
    }

    #[test]
    fn advance_moves_whole_days_only(start in 0i64..365, hour in 0u32..24) {
        let date = at(start);
        let text = format!("{}T{:02}:15:00-03:00", date, hour);
        let ts = PaymentTimestamp::parse(&text).unwrap();
        let advanced = WeekendCalendar.advance(ts).unwrap();

        prop_assert_eq!(advanced.naive_local().time(), ts.naive_local().time());
        prop_assert_eq!(advanced.offset(), ts.offset());
        prop_assert!(advanced.date().is_weekday());
    }

    #[test]
    fn any_shift_is_checked(start in 0i64..3650, days in any::<i64>()) {
        let date = at(start);
        match date.add_days(days) {
            Ok(shifted) => prop_assert_eq!(date.days_between(&shifted), days),
            Err(err) => prop_assert!(err.to_string().contains("out of range")),
        }

        let ts = PaymentTimestamp::parse(&format!("{}T12:00:00Z", date)).unwrap();
        prop_assert_eq!(ts.add_days(days).is_ok(), date.add_days(days).is_ok());
    }
}
