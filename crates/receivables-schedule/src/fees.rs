//! Anticipation fee schedules.
//!
//! A fee schedule maps an installment count to the fraction of the
//! transaction value withheld when the receivable is anticipated.
//!
//! # Supported Policies
//!
//! - [`FixedFeeTable`]: explicit table, 1 installment → 2% up to 21 → 22%.
//!   Counts outside the table are rejected. This is the default.
//! - [`LinearFee`]: `base + step × (parcels − 1)`, no upper bound.
//!
//! # Usage
//!
//! ```rust
//! use receivables_schedule::fees::{FeePolicy, FeeSchedule};
//! use rust_decimal_macros::dec;
//!
//! let fees = FeePolicy::FixedTable.to_fee_schedule();
//! assert_eq!(fees.rate(1), Some(dec!(0.02)));
//! assert_eq!(fees.rate(21), Some(dec!(0.22)));
//! assert_eq!(fees.rate(22), None);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Trait for anticipation fee rules.
///
/// Implementations must be thread-safe (`Send + Sync`); a builder shares one
/// schedule across every transaction of a batch.
pub trait FeeSchedule: Send + Sync + fmt::Debug {
    /// Returns the name of the fee rule.
    fn name(&self) -> &'static str;

    /// Returns the fee rate for `parcels` installments, or `None` when the
    /// count is not supported.
    fn rate(&self, parcels: u32) -> Option<Decimal>;

    /// Installment counts this schedule prices, if bounded.
    fn supported_range(&self) -> Option<RangeInclusive<u32>>;

    /// Human-readable supported range, e.g. "1-21".
    fn describe_range(&self) -> String {
        match self.supported_range() {
            Some(range) => format!("{}-{}", range.start(), range.end()),
            None => "1 or more".to_string(),
        }
    }
}

/// Fixed rate table keyed by installment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFeeTable {
    rates: BTreeMap<u32, Decimal>,
}

impl FixedFeeTable {
    /// Largest installment count of the standard table.
    pub const MAX_PARCELS: u32 = 21;

    /// The standard table: 2% for one installment, one point more per
    /// additional installment, up to 22% for 21.
    pub fn standard() -> Self {
        let rates = (1..=Self::MAX_PARCELS)
            .map(|p| (p, dec!(0.01) * Decimal::from(p + 1)))
            .collect();
        Self { rates }
    }

    /// Creates a table from explicit `(parcels, rate)` pairs.
    pub fn from_rates(rates: impl IntoIterator<Item = (u32, Decimal)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// Table entries in ascending installment order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        self.rates.iter().map(|(p, r)| (*p, *r))
    }
}

impl Default for FixedFeeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FeeSchedule for FixedFeeTable {
    fn name(&self) -> &'static str {
        "Fixed table"
    }

    fn rate(&self, parcels: u32) -> Option<Decimal> {
        self.rates.get(&parcels).copied()
    }

    fn supported_range(&self) -> Option<RangeInclusive<u32>> {
        let first = *self.rates.keys().next()?;
        let last = *self.rates.keys().next_back()?;
        Some(first..=last)
    }
}

/// Linear fee: `base + step × (parcels − 1)`.
///
/// Not clamped: from 99 installments on (with the default coefficients) the
/// rate reaches 100% and the anticipated amount is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearFee {
    base: Decimal,
    step: Decimal,
}

impl LinearFee {
    /// Creates a linear fee with explicit coefficients.
    pub fn new(base: Decimal, step: Decimal) -> Self {
        Self { base, step }
    }
}

impl Default for LinearFee {
    fn default() -> Self {
        Self::new(dec!(0.02), dec!(0.01))
    }
}

impl FeeSchedule for LinearFee {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn rate(&self, parcels: u32) -> Option<Decimal> {
        if parcels == 0 {
            return None;
        }
        let rate = self.base + self.step * Decimal::from(parcels - 1);
        if rate >= Decimal::ONE {
            log::warn!(
                "linear fee for {} installments is {}: anticipated amount will not be positive",
                parcels,
                rate
            );
        }
        Some(rate)
    }

    fn supported_range(&self) -> Option<RangeInclusive<u32>> {
        None
    }
}

/// Selectable fee policies.
///
/// Serialized in kebab-case (`"fixed-table"`, `"linear"`) for configuration
/// files and command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeePolicy {
    /// [`FixedFeeTable::standard`]
    #[default]
    FixedTable,
    /// [`LinearFee::default`]
    Linear,
}

impl FeePolicy {
    /// Creates a shared fee schedule implementation.
    #[must_use]
    pub fn to_fee_schedule(&self) -> Arc<dyn FeeSchedule> {
        match self {
            FeePolicy::FixedTable => Arc::new(FixedFeeTable::standard()),
            FeePolicy::Linear => Arc::new(LinearFee::default()),
        }
    }

    /// Returns the policy identifier.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FeePolicy::FixedTable => "fixed-table",
            FeePolicy::Linear => "linear",
        }
    }

    /// Returns all available policies.
    #[must_use]
    pub fn all() -> &'static [FeePolicy] {
        &[FeePolicy::FixedTable, FeePolicy::Linear]
    }
}

impl fmt::Display for FeePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for FeePolicy {
    type Err = FeePolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed-table" | "fixed_table" | "fixed" | "table" => Ok(FeePolicy::FixedTable),
            "linear" => Ok(FeePolicy::Linear),
            _ => Err(FeePolicyParseError(s.to_string())),
        }
    }
}

/// Error type for parsing fee policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeePolicyParseError(pub String);

impl fmt::Display for FeePolicyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown fee policy: '{}' (expected 'fixed-table' or 'linear')",
            self.0
        )
    }
}

impl std::error::Error for FeePolicyParseError {}
