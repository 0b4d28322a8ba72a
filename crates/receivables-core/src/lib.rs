//! # Receivables Core
//!
//! Core types and business-day calendars for the Receivables scheduling library.
//!
//! This crate provides the building blocks used by the schedule builder:
//!
//! - **Types**: [`Date`], [`PaymentTimestamp`] and [`Amount`]
//! - **Business Day Calendars**: weekend-only and holiday-set calendars with
//!   a bounded forward rollover
//!
//! ## Example
//!
//! ```rust
//! use receivables_core::prelude::*;
//!
//! let paid = PaymentTimestamp::parse("2024-03-01T10:30:00Z").unwrap();
//! let calendar = HolidayCalendar::empty();
//!
//! // Friday + 1 day lands on Saturday and rolls to Monday
//! let due = calendar.advance(paid.add_days(1).unwrap()).unwrap();
//! assert_eq!(due.date().to_string(), "2024-03-04");
//!
//! let amount = Amount::from_cents(5000);
//! assert_eq!(amount.to_string(), "50.00");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Amount, Date, PaymentTimestamp};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Amount, Date, PaymentTimestamp};
