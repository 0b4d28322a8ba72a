//! Domain types for receivables scheduling.
//!
//! - [`Date`]: Calendar date used for due dates and holidays
//! - [`PaymentTimestamp`]: Offset-aware payment instant parsed from ISO-8601
//! - [`Amount`]: Monetary amount in major units with two decimals

mod amount;
mod date;
mod timestamp;

pub use amount::Amount;
pub use date::Date;
pub use timestamp::PaymentTimestamp;
