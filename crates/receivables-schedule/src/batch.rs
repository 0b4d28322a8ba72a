//! Batch schedule construction.
//!
//! Two modes over a slice of transactions, both order-preserving:
//!
//! - [`ScheduleBuilder::build_all`]: stops at the first failure and reports
//!   its position.
//! - [`ScheduleBuilder::build_each`]: one result per transaction.
//!
//! With the `parallel` feature, batches at or above
//! [`ScheduleOptions::parallel_threshold`](crate::builder::ScheduleOptions)
//! run on the rayon thread pool.

use thiserror::Error;

use receivables_core::calendars::Calendar;

use crate::builder::{ScheduleBuilder, ScheduleOptions};
use crate::error::{ScheduleError, ScheduleResult};
use crate::schedule::ReceivablesSchedule;
use crate::transaction::Transaction;

/// A batch failure: the first transaction that could not be scheduled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transaction #{index} failed: {source}")]
pub struct BatchError {
    /// Zero-based position in the batch.
    pub index: usize,
    /// The underlying error.
    #[source]
    pub source: ScheduleError,
}

impl<C: Calendar> ScheduleBuilder<C> {
    /// Builds every schedule, failing on the first error.
    ///
    /// On the parallel path every transaction is still built; the reported
    /// error is the one with the lowest index either way.
    pub fn build_all(
        &self,
        transactions: &[Transaction],
    ) -> Result<Vec<ReceivablesSchedule>, BatchError> {
        let stop = |index: usize, source: ScheduleError| {
            log::debug!("batch stopped at transaction #{}: {}", index, source);
            BatchError { index, source }
        };

        if cfg!(feature = "parallel") && self.options().should_parallelize(transactions.len()) {
            return self
                .build_each(transactions)
                .into_iter()
                .enumerate()
                .map(|(index, result)| result.map_err(|e| stop(index, e)))
                .collect();
        }

        transactions
            .iter()
            .enumerate()
            .map(|(index, tx)| self.build(tx).map_err(|e| stop(index, e)))
            .collect()
    }

    /// Builds every schedule, collecting each outcome in input order.
    pub fn build_each(
        &self,
        transactions: &[Transaction],
    ) -> Vec<ScheduleResult<ReceivablesSchedule>> {
        log::debug!("building {} schedule(s)", transactions.len());
        maybe_parallel_map(transactions, self.options(), |tx| self.build(tx))
    }
}

#[allow(unused_variables)]
fn maybe_parallel_map<T, U, F>(items: &[T], options: &ScheduleOptions, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if options.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<Transaction> {
        vec![
            Transaction::new(1, "Aprovada", "Visa", "Débito", "2024-03-01T00:00:00Z", 5000),
            Transaction::new(2, "Aprovada", "Visa", "Boleto", "2024-03-01T00:00:00Z", 5000),
            Transaction::new(3, "Aprovada", "Visa", "Crédito", "2024-03-01T00:00:00Z", 9000)
                .with_parcels(3),
            Transaction::new(4, "Aprovada", "Visa", "Crédito", "not a date", 100),
        ]
    }

    #[test]
    fn test_build_all_fails_fast_with_index() {
        let err = ScheduleBuilder::new().build_all(&batch()).unwrap_err();
        assert_eq!(err.index, 1);
        assert!(matches!(
            err.source,
            ScheduleError::UnrecognizedProductType { .. }
        ));
        assert!(err.to_string().starts_with("transaction #1 failed"));
    }

    #[test]
    fn test_build_each_keeps_order() {
        let results = ScheduleBuilder::new().build_each(&batch());
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().installment_count(), 3);
        assert!(matches!(
            results[3],
            Err(ScheduleError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_build_all_success() {
        let txs: Vec<Transaction> = batch().into_iter().step_by(2).collect();
        let schedules = ScheduleBuilder::new().build_all(&txs).unwrap();
        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].nsu.to_string(), "1");
        assert_eq!(schedules[1].nsu.to_string(), "3");
    }

    #[test]
    fn test_empty_batch() {
        assert!(ScheduleBuilder::new().build_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_large_batch_matches_sequential() {
        let txs: Vec<Transaction> = (0..600)
            .map(|i| {
                let paid = "2024-01-02T00:00:00Z";
                Transaction::new(i, "Aprovada", "Visa", "Crédito", paid, 1000 + i)
                    .with_parcels(1 + i % 12)
            })
            .collect();
        let default = ScheduleBuilder::new().build_all(&txs).unwrap();
        let sequential = ScheduleBuilder::new()
            .with_options(ScheduleOptions::sequential())
            .build_all(&txs)
            .unwrap();
        assert_eq!(default, sequential);
    }
}
