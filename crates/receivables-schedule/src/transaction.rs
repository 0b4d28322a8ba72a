//! Transaction records as sent by the payment processor.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{ScheduleError, ScheduleResult};

/// Opaque transaction identifier (NSU), passed through unchanged.
///
/// Processors send it as a string or a number; both are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Value);

impl TransactionId {
    /// Wraps a raw JSON value.
    pub fn new(value: impl Into<Value>) -> Self {
        TransactionId(value.into())
    }

    /// Returns the raw JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// Card product of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// "Débito": settled in one installment on the next business day.
    Debit,
    /// "Crédito": settled in monthly installments.
    Credit,
}

impl ProductType {
    /// Canonical product name as processors spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Debit => "Débito",
            ProductType::Credit => "Crédito",
        }
    }
}

impl FromStr for ProductType {
    type Err = String;

    /// Case-insensitive, accents required.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "débito" => Ok(ProductType::Debit),
            "crédito" => Ok(ProductType::Credit),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the receivable is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResolutionType {
    /// "Automática": credit receivables are anticipated automatically.
    Automatic,
    /// Anything else, including an absent field.
    #[default]
    Other,
}

impl ResolutionType {
    /// Classifies a raw resolution type (case-insensitive).
    pub fn classify(raw: &str) -> Self {
        if raw.to_lowercase() == "automática" {
            ResolutionType::Automatic
        } else {
            ResolutionType::Other
        }
    }

    /// Returns true for automatic anticipation.
    pub fn is_automatic(&self) -> bool {
        matches!(self, ResolutionType::Automatic)
    }
}

fn empty_value() -> Value {
    Value::String(String::new())
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn one() -> i64 {
    1
}

/// A processor transaction with every required field present.
///
/// Domain strings (`product_name`, `payment_date`, `resolution_type`) are kept
/// as received; the schedule builder interprets them and reports errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction identifier.
    pub nsu: TransactionId,
    /// Processor status, passed through.
    pub status: Value,
    /// Card brand, passed through.
    pub brand: Value,
    /// Gateway name, passed through (default empty).
    #[serde(default = "empty_value")]
    pub gateway_name: Value,
    /// Merchant id at the issuer, passed through (default empty).
    #[serde(default = "empty_value")]
    pub merchant_issuer_specific_id: Value,
    /// "Débito" or "Crédito", any case.
    pub product_name: String,
    /// Settlement mode; "Automática" triggers anticipation (default empty).
    #[serde(default)]
    pub resolution_type: String,
    /// ISO-8601 payment timestamp.
    pub payment_date: String,
    /// Value in minor units (cents).
    pub value: i64,
    /// Installment count for credit (default 1).
    #[serde(default = "one")]
    pub parcels: i64,
}

impl Transaction {
    /// Creates a transaction with the required fields; optional ones default.
    pub fn new(
        nsu: impl Into<Value>,
        status: impl Into<Value>,
        brand: impl Into<Value>,
        product_name: impl Into<String>,
        payment_date: impl Into<String>,
        value: i64,
    ) -> Self {
        Self {
            nsu: TransactionId::new(nsu),
            status: status.into(),
            brand: brand.into(),
            gateway_name: empty_value(),
            merchant_issuer_specific_id: empty_value(),
            product_name: product_name.into(),
            resolution_type: String::new(),
            payment_date: payment_date.into(),
            value,
            parcels: 1,
        }
    }

    /// Sets the installment count.
    pub fn with_parcels(mut self, parcels: i64) -> Self {
        self.parcels = parcels;
        self
    }

    /// Sets the resolution type.
    pub fn with_resolution_type(mut self, resolution_type: impl Into<String>) -> Self {
        self.resolution_type = resolution_type.into();
        self
    }

    /// Sets the gateway name.
    pub fn with_gateway_name(mut self, gateway_name: impl Into<Value>) -> Self {
        self.gateway_name = gateway_name.into();
        self
    }

    /// Sets the merchant issuer specific id.
    pub fn with_merchant_issuer_specific_id(mut self, id: impl Into<Value>) -> Self {
        self.merchant_issuer_specific_id = id.into();
        self
    }

    /// Classified resolution type.
    pub fn resolution(&self) -> ResolutionType {
        ResolutionType::classify(&self.resolution_type)
    }

    /// Parsed product type.
    pub fn product(&self) -> ScheduleResult<ProductType> {
        self.product_name
            .parse()
            .map_err(|product_name| ScheduleError::UnrecognizedProductType {
                nsu: self.nsu.to_string(),
                product_name,
            })
    }
}

/// A transaction as it appears in input JSON, every field optional.
///
/// Convert with [`TransactionRecord::into_transaction`], which names the first
/// missing required field. Pass-through fields (`nsu`, `status`, `brand`,
/// `gateway_name`, `merchant_issuer_specific_id`) count as present when they
/// hold `null`, and the `null` is carried into the schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction identifier.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub nsu: Option<Value>,
    /// Processor status.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Card brand.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub brand: Option<Value>,
    /// Gateway name.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gateway_name: Option<Value>,
    /// Merchant id at the issuer.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub merchant_issuer_specific_id: Option<Value>,
    /// Product name.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Resolution type.
    #[serde(default)]
    pub resolution_type: Option<String>,
    /// Payment timestamp.
    #[serde(default)]
    pub payment_date: Option<String>,
    /// Value in cents.
    #[serde(default)]
    pub value: Option<i64>,
    /// Installment count.
    #[serde(default)]
    pub parcels: Option<i64>,
}

impl TransactionRecord {
    /// Checks required fields and produces a [`Transaction`].
    ///
    /// Fields are checked in the order `nsu`, `status`, `brand`,
    /// `product_name`, `payment_date`, `value`.
    pub fn into_transaction(self) -> ScheduleResult<Transaction> {
        let nsu = self
            .nsu
            .map(TransactionId)
            .ok_or_else(|| ScheduleError::missing_field(None, "nsu"))?;
        let id = Some(nsu.to_string());

        let status = self
            .status
            .ok_or_else(|| ScheduleError::missing_field(id.clone(), "status"))?;
        let brand = self
            .brand
            .ok_or_else(|| ScheduleError::missing_field(id.clone(), "brand"))?;
        let product_name = self
            .product_name
            .ok_or_else(|| ScheduleError::missing_field(id.clone(), "product_name"))?;
        let payment_date = self
            .payment_date
            .ok_or_else(|| ScheduleError::missing_field(id.clone(), "payment_date"))?;
        let value = self
            .value
            .ok_or_else(|| ScheduleError::missing_field(id, "value"))?;

        Ok(Transaction {
            nsu,
            status,
            brand,
            gateway_name: self.gateway_name.unwrap_or_else(empty_value),
            merchant_issuer_specific_id: self
                .merchant_issuer_specific_id
                .unwrap_or_else(empty_value),
            product_name,
            resolution_type: self.resolution_type.unwrap_or_default(),
            payment_date,
            value,
            parcels: self.parcels.unwrap_or(1),
        })
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ScheduleError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        record.into_transaction()
    }
}
