//! Output model: installments and the per-transaction schedule.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use receivables_core::types::{Amount, Date};

use crate::transaction::TransactionId;

/// One expected payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based installment number.
    pub installment: u32,
    /// Business-day adjusted due date.
    pub due_date: Date,
    /// Amount in major units, two decimals.
    pub amount: Amount,
}

impl Installment {
    /// Creates an installment.
    pub fn new(installment: u32, due_date: Date, amount: Amount) -> Self {
        Self {
            installment,
            due_date,
            amount,
        }
    }
}

/// The receivables schedule of one transaction.
///
/// Field order matches the serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivablesSchedule {
    /// Transaction identifier.
    pub nsu: TransactionId,
    /// Processor status.
    pub status: Value,
    /// Card brand.
    pub brand: Value,
    /// Gateway name.
    pub gateway_name: Value,
    /// Merchant id at the issuer.
    pub merchant_issuer_specific_id: Value,
    /// Product name as received ("Débito" / "Crédito").
    pub credit_or_debit: String,
    /// Resolution type as received.
    pub resolution_type: String,
    /// Payment date; omitted when disabled in the builder options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<Date>,
    /// Installments as originally contracted.
    pub original_installments: Vec<Installment>,
    /// Single anticipated payout, for automatic credit only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_installment: Option<Installment>,
}

impl ReceivablesSchedule {
    /// Sum of the original installments in cents.
    pub fn total_cents(&self) -> i64 {
        self.original_installments
            .iter()
            .map(|i| i.amount.to_cents())
            .sum()
    }

    /// Returns true when an anticipated payout was computed.
    pub fn is_anticipated(&self) -> bool {
        self.new_installment.is_some()
    }

    /// Number of original installments.
    pub fn installment_count(&self) -> usize {
        self.original_installments.len()
    }
}
