//! # Receivables Schedule
//!
//! Turns a card transaction into the installments the merchant will receive.
//!
//! This crate provides:
//!
//! - **Transactions**: the processor record ([`Transaction`]) and its loose
//!   JSON form ([`TransactionRecord`])
//! - **Schedules**: [`ReceivablesSchedule`] with the original installments and
//!   the optional anticipated payout
//! - **Fees**: pluggable anticipation fee schedules ([`FixedFeeTable`],
//!   [`LinearFee`])
//! - **Builder**: [`ScheduleBuilder`], single and batch
//!
//! ## Example
//!
//! ```rust
//! use receivables_schedule::prelude::*;
//! use receivables_core::calendars::HolidayCalendar;
//!
//! let tx = Transaction::new("123456", "Aprovada", "Visa", "Crédito", "2024-01-02T00:00:00Z", 10000)
//!     .with_parcels(3)
//!     .with_resolution_type("Automática");
//!
//! let builder = ScheduleBuilder::new().with_calendar(HolidayCalendar::empty());
//! let schedule = builder.build(&tx).unwrap();
//!
//! let amounts: Vec<String> = schedule
//!     .original_installments
//!     .iter()
//!     .map(|i| i.amount.to_string())
//!     .collect();
//! assert_eq!(amounts, ["33.34", "33.33", "33.33"]);
//! assert_eq!(schedule.new_installment.unwrap().amount.to_string(), "96.00");
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
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod batch;
pub mod builder;
pub mod error;
pub mod fees;
pub mod input;
pub mod schedule;
pub mod transaction;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::BatchError;
    pub use crate::builder::{build_schedule, ScheduleBuilder, ScheduleOptions};
    pub use crate::error::{ScheduleError, ScheduleResult};
    pub use crate::fees::{FeePolicy, FeeSchedule, FixedFeeTable, LinearFee};
    pub use crate::input::{parse_complete_transactions, parse_transactions, read_transactions};
    pub use crate::schedule::{Installment, ReceivablesSchedule};
    pub use crate::transaction::{
        ProductType, ResolutionType, Transaction, TransactionId, TransactionRecord,
    };
}

pub use batch::BatchError;
pub use builder::{build_schedule, ScheduleBuilder, ScheduleOptions};
pub use error::{ScheduleError, ScheduleResult};
pub use fees::{FeePolicy, FeeSchedule, FixedFeeTable, LinearFee};
pub use schedule::{Installment, ReceivablesSchedule};
pub use transaction::{ProductType, ResolutionType, Transaction, TransactionId, TransactionRecord};
