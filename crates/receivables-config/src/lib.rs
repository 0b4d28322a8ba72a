//! Receivables Configuration Layer
//!
//! Settings for schedule construction, loaded from TOML or JSON:
//!
//! - **Fee policy**: fixed table (default) or linear anticipation fees
//! - **Output**: whether schedules carry `transaction_date`
//! - **Rollover**: how far a due date may move before giving up
//! - **Holidays**: a JSON holiday file plus inline dates
//!
//! # Example
//!
//! ```rust
//! use receivables_config::{ScheduleConfig, Validate};
//! use receivables_schedule::FeePolicy;
//!
//! let config = ScheduleConfig::from_toml_str(r#"
//!     fee_policy = "linear"
//!     holidays = ["2024-12-25"]
//! "#).unwrap();
//!
//! assert_eq!(config.fee_policy, FeePolicy::Linear);
//! assert!(config.include_transaction_date);
//! assert!(config.is_valid());
//!
//! let builder = config.builder(None).unwrap();
//! assert_eq!(builder.calendar().holiday_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod loader;
pub mod schedule;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use loader::ConfigFormat;
pub use schedule::ScheduleConfig;
