//! Two-decimal monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Decimal places carried by every amount.
pub const AMOUNT_SCALE: u32 = 2;

/// A monetary amount in major units (e.g. reais), always two decimals.
///
/// Built from minor units (cents) without going through floating point.
/// Serializes as a fixed two-decimal string such as `"100.00"`.
///
/// # Example
///
/// ```rust
/// use receivables_core::types::Amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(Amount::from_cents(3334).to_string(), "33.34");
/// assert_eq!(Amount::from_cents(3334).to_cents(), 3334);
///
/// // 98.0098 rounds half-to-even at two decimals
/// let net = Amount::from_decimal(Decimal::new(980098, 4));
/// assert_eq!(net.to_string(), "98.01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates an amount from minor units. Exact.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Amount(Decimal::new(cents, AMOUNT_SCALE))
    }

    /// Creates an amount from a decimal in major units.
    ///
    /// Values with more than two decimals are rounded half-to-even.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(AMOUNT_SCALE);
        Amount(rounded)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub fn to_cents(&self) -> i64 {
        self.0.mantissa() as i64
    }

    /// Returns the amount as a decimal in major units.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Amount::from_decimal)
            .map_err(|e| CoreError::InvalidAmount {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents_is_exact() {
        assert_eq!(Amount::from_cents(10000).to_string(), "100.00");
        assert_eq!(Amount::from_cents(1).to_string(), "0.01");
        assert_eq!(Amount::from_cents(0).to_string(), "0.00");
        assert_eq!(Amount::from_cents(-3334).to_string(), "-33.34");
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(Amount::from_decimal(dec!(1.225)).to_string(), "1.22");
        assert_eq!(Amount::from_decimal(dec!(1.235)).to_string(), "1.24");
        assert_eq!(Amount::from_decimal(dec!(98.0098)).to_string(), "98.01");
    }

    #[test]
    fn test_cents_round_trip_after_rounding() {
        assert_eq!(Amount::from_decimal(dec!(7)).to_cents(), 700);
        assert_eq!(Amount::from_decimal(dec!(0.005)).to_cents(), 0);
        assert_eq!(Amount::from_decimal(dec!(0.015)).to_cents(), 2);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Amount::from_cents(5000)).unwrap();
        assert_eq!(json, "\"50.00\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Amount::from_cents(5000));
    }
}
