//! Schedule construction.
//!
//! [`ScheduleBuilder`] holds the read-only inputs of the computation (holiday
//! calendar, fee schedule, output options) and turns one [`Transaction`] into
//! one [`ReceivablesSchedule`].
//!
//! # Rules
//!
//! - **Débito**: a single installment of the full value, due on the first
//!   business day on or after the day following payment.
//! - **Crédito**: `parcels` installments. The value is split with Euclidean
//!   division and the remainder cents go to the first installments.
//!   Installment `i` is due `30 × i` days after payment, rolled forward to a
//!   business day.
//! - **Automatic anticipation** (credit with resolution type "Automática"):
//!   one extra payout of `value × (1 − rate)`, due one business day after
//!   payment.
//!
//! Due dates are always computed from the payment date, never chained.
//! A credit may have at most [`MAX_INSTALLMENTS`] installments.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use std::sync::Arc;

use receivables_core::calendars::{Calendar, HolidayCalendar, DEFAULT_MAX_ROLLOVER_DAYS};
use receivables_core::types::{Amount, Date, PaymentTimestamp};

use crate::error::{ScheduleError, ScheduleResult};
use crate::fees::{FeePolicy, FeeSchedule};
use crate::schedule::{Installment, ReceivablesSchedule};
use crate::transaction::{ProductType, Transaction};

/// Days from payment to the debit settlement date, before rollover.
pub const DEBIT_SETTLEMENT_DAYS: i64 = 1;

/// Days between consecutive credit installments.
pub const CREDIT_INSTALLMENT_INTERVAL_DAYS: i64 = 30;

/// Days from payment to the anticipated payout, before rollover.
pub const ANTICIPATION_SETTLEMENT_DAYS: i64 = 1;

/// Largest installment count a credit transaction may have.
pub const MAX_INSTALLMENTS: u32 = 1200;

/// Batch size above which the parallel path is used.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Options controlling schedule output and batch execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Emit `transaction_date` in the output.
    pub include_transaction_date: bool,
    /// Maximum days a due date may roll forward.
    pub max_rollover_days: u32,
    /// Allow parallel batch processing (requires the `parallel` feature).
    pub parallel: bool,
    /// Minimum batch size for parallel processing.
    pub parallel_threshold: usize,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            include_transaction_date: true,
            max_rollover_days: DEFAULT_MAX_ROLLOVER_DAYS,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ScheduleOptions {
    /// Options that never use the parallel path.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Returns true if a batch of `len` transactions should run in parallel.
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.parallel && len >= self.parallel_threshold
    }
}

/// Builds receivables schedules.
///
/// Stateless between calls and `Send + Sync` when the calendar is, so one
/// builder can serve a whole batch.
///
/// # Example
///
/// ```rust
/// use receivables_schedule::{ScheduleBuilder, Transaction};
///
/// let tx = Transaction::new("1", "Aprovada", "Master", "Débito", "2024-03-01T00:00:00Z", 5000);
/// let schedule = ScheduleBuilder::new().build(&tx).unwrap();
///
/// let first = &schedule.original_installments[0];
/// assert_eq!(first.due_date.to_string(), "2024-03-04");
/// assert_eq!(first.amount.to_string(), "50.00");
/// ```
#[derive(Clone)]
pub struct ScheduleBuilder<C: Calendar = HolidayCalendar> {
    calendar: C,
    fees: Arc<dyn FeeSchedule>,
    options: ScheduleOptions,
}

impl ScheduleBuilder<HolidayCalendar> {
    /// Creates a builder with no holidays, the standard fee table and
    /// default options.
    pub fn new() -> Self {
        Self {
            calendar: HolidayCalendar::empty(),
            fees: FeePolicy::default().to_fee_schedule(),
            options: ScheduleOptions::default(),
        }
    }
}

impl Default for ScheduleBuilder<HolidayCalendar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Calendar + fmt::Debug> fmt::Debug for ScheduleBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleBuilder")
            .field("calendar", &self.calendar)
            .field("fees", &self.fees.name())
            .field("options", &self.options)
            .finish()
    }
}

impl<C: Calendar> ScheduleBuilder<C> {
    /// Replaces the business-day calendar.
    pub fn with_calendar<D: Calendar>(self, calendar: D) -> ScheduleBuilder<D> {
        ScheduleBuilder {
            calendar,
            fees: self.fees,
            options: self.options,
        }
    }

    /// Sets the fee schedule.
    pub fn with_fee_schedule(mut self, fees: Arc<dyn FeeSchedule>) -> Self {
        self.fees = fees;
        self
    }

    /// Sets the fee schedule from a policy.
    pub fn with_fee_policy(self, policy: FeePolicy) -> Self {
        self.with_fee_schedule(policy.to_fee_schedule())
    }

    /// Replaces all options.
    pub fn with_options(mut self, options: ScheduleOptions) -> Self {
        self.options = options;
        self
    }

    /// Toggles `transaction_date` in the output.
    pub fn include_transaction_date(mut self, include: bool) -> Self {
        self.options.include_transaction_date = include;
        self
    }

    /// Sets the rollover limit.
    pub fn max_rollover_days(mut self, days: u32) -> Self {
        self.options.max_rollover_days = days;
        self
    }

    /// Returns the calendar.
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Returns the fee schedule.
    pub fn fee_schedule(&self) -> &dyn FeeSchedule {
        self.fees.as_ref()
    }

    /// Returns the options.
    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Builds the schedule of one transaction.
    ///
    /// Validation order: payment date, product type, installment count,
    /// fee lookup. No partial schedule is returned on error.
    pub fn build(&self, tx: &Transaction) -> ScheduleResult<ReceivablesSchedule> {
        let nsu = tx.nsu.to_string();
        let paid = PaymentTimestamp::parse(&tx.payment_date)
            .map_err(|e| ScheduleError::from_core(nsu.as_str(), e))?;
        let product = tx.product()?;

        let original_installments = match product {
            ProductType::Debit => {
                let due = self.due_date(&nsu, paid, DEBIT_SETTLEMENT_DAYS)?;
                vec![Installment::new(1, due, Amount::from_cents(tx.value))]
            }
            ProductType::Credit => {
                let parcels = installment_count(tx, &nsu)?;
                let due_dates = (1..=parcels)
                    .map(|n| {
                        let offset = CREDIT_INSTALLMENT_INTERVAL_DAYS * i64::from(n);
                        self.due_date(&nsu, paid, offset)
                    })
                    .collect::<ScheduleResult<Vec<_>>>()?;
                apportion(tx.value, parcels)
                    .into_iter()
                    .zip(due_dates)
                    .zip(1u32..)
                    .map(|((cents, due), n)| Installment::new(n, due, Amount::from_cents(cents)))
                    .collect()
            }
        };

        let new_installment = if product == ProductType::Credit && tx.resolution().is_automatic()
        {
            Some(self.anticipate(tx, &nsu, paid)?)
        } else {
            None
        };

        log::debug!(
            "transaction {}: {} {} installment(s){}",
            nsu,
            product,
            original_installments.len(),
            if new_installment.is_some() {
                ", anticipated"
            } else {
                ""
            }
        );

        Ok(ReceivablesSchedule {
            nsu: tx.nsu.clone(),
            status: tx.status.clone(),
            brand: tx.brand.clone(),
            gateway_name: tx.gateway_name.clone(),
            merchant_issuer_specific_id: tx.merchant_issuer_specific_id.clone(),
            credit_or_debit: tx.product_name.clone(),
            resolution_type: tx.resolution_type.clone(),
            transaction_date: self.options.include_transaction_date.then(|| paid.date()),
            original_installments,
            new_installment,
        })
    }

    fn due_date(&self, nsu: &str, paid: PaymentTimestamp, days: i64) -> ScheduleResult<Date> {
        paid.add_days(days)
            .and_then(|ts| self.calendar.advance_within(ts, self.options.max_rollover_days))
            .map(|ts| ts.date())
            .map_err(|e| ScheduleError::from_core(nsu, e))
    }

    fn anticipate(
        &self,
        tx: &Transaction,
        nsu: &str,
        paid: PaymentTimestamp,
    ) -> ScheduleResult<Installment> {
        let parcels = installment_count(tx, nsu)?;
        let rate = self
            .fees
            .rate(parcels)
            .ok_or_else(|| ScheduleError::UnsupportedInstallmentCount {
                nsu: nsu.to_string(),
                parcels: tx.parcels,
                supported: self.fees.describe_range(),
            })?;

        let net = Decimal::from(tx.value) * (Decimal::ONE - rate) / dec!(100);
        let due = self.due_date(nsu, paid, ANTICIPATION_SETTLEMENT_DAYS)?;
        Ok(Installment::new(1, due, Amount::from_decimal(net)))
    }
}

/// Builds a schedule with default options and fees over `calendar`.
pub fn build_schedule<C: Calendar>(
    tx: &Transaction,
    calendar: C,
) -> ScheduleResult<ReceivablesSchedule> {
    ScheduleBuilder::new().with_calendar(calendar).build(tx)
}

/// Splits `value` cents into `parcels` parts.
///
/// Uses Euclidean division: the first `value mod parcels` parts get one cent
/// more than the rest. Parts always sum to `value`, negative values included.
/// Returns an empty vector for zero parcels.
///
/// ```rust
/// use receivables_schedule::builder::apportion;
///
/// assert_eq!(apportion(10000, 3), vec![3334, 3333, 3333]);
/// assert_eq!(apportion(-10, 3), vec![-3, -3, -4]);
/// ```
pub fn apportion(value: i64, parcels: u32) -> Vec<i64> {
    if parcels == 0 {
        return Vec::new();
    }
    let n = i64::from(parcels);
    let base = value.div_euclid(n);
    let remainder = value.rem_euclid(n);
    (1..=n)
        .map(|i| if i <= remainder { base + 1 } else { base })
        .collect()
}

fn installment_count(tx: &Transaction, nsu: &str) -> ScheduleResult<u32> {
    u32::try_from(tx.parcels)
        .ok()
        .filter(|p| (1..=MAX_INSTALLMENTS).contains(p))
        .ok_or_else(|| ScheduleError::UnsupportedInstallmentCount {
            nsu: nsu.to_string(),
            parcels: tx.parcels,
            supported: format!("1-{}", MAX_INSTALLMENTS),
        })
}
