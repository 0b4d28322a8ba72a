//! Transaction input from JSON.
//!
//! Input is either a single transaction object or an array of them.

use serde_json::Value;
use std::io::Read;

use crate::error::{ScheduleError, ScheduleResult};
use crate::transaction::{Transaction, TransactionRecord};

/// Parses transaction records from a JSON string.
///
/// Records are returned unvalidated; see
/// [`TransactionRecord::into_transaction`].
///
/// # Example
///
/// ```rust
/// use receivables_schedule::input::parse_transactions;
///
/// let one = parse_transactions(r#"{"nsu": "1", "value": 100}"#).unwrap();
/// assert_eq!(one.len(), 1);
///
/// let many = parse_transactions(r#"[{"nsu": "1"}, {"nsu": "2"}]"#).unwrap();
/// assert_eq!(many.len(), 2);
/// ```
pub fn parse_transactions(json: &str) -> ScheduleResult<Vec<TransactionRecord>> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(value)
}

/// Reads transaction records from any UTF-8 source.
pub fn read_transactions<R: Read>(mut reader: R) -> ScheduleResult<Vec<TransactionRecord>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_transactions(&content)
}

/// Parses and validates transactions, failing on the first incomplete record.
pub fn parse_complete_transactions(json: &str) -> ScheduleResult<Vec<Transaction>> {
    parse_transactions(json)?
        .into_iter()
        .map(TransactionRecord::into_transaction)
        .collect()
}

fn records_from_value(value: Value) -> ScheduleResult<Vec<TransactionRecord>> {
    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(ScheduleError::InvalidRecord {
                index: 0,
                reason: format!(
                    "expected a transaction object or an array of them, found {}",
                    kind(&other)
                ),
            })
        }
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ScheduleError::InvalidRecord {
                    index,
                    reason: format!("expected an object, found {}", kind(&item)),
                });
            }
            serde_json::from_value(item).map_err(|e| ScheduleError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<ScheduleResult<Vec<TransactionRecord>>>()?;

    log::debug!("parsed {} transaction record(s)", records.len());
    Ok(records)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
