//! Fees command implementation.
//!
//! Prints the anticipation rate per installment count.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use receivables_schedule::{FeePolicy, FeeSchedule, FixedFeeTable};

use crate::cli::{FeePolicyChoice, OutputFormat};
use crate::output::{render_json, render_table, write_output, FeeRow};

/// Arguments for the fees command.
#[derive(Args, Debug)]
pub struct FeesArgs {
    /// Fee policy to display
    #[arg(long, value_enum, default_value = "fixed-table")]
    pub fee_policy: FeePolicyChoice,

    /// Largest installment count to show
    #[arg(long, default_value_t = FixedFeeTable::MAX_PARCELS)]
    pub max: u32,
}

/// Execute the fees command.
pub fn execute(args: FeesArgs, format: OutputFormat) -> Result<()> {
    let policy = FeePolicy::from(args.fee_policy);
    let fees = policy.to_fee_schedule();
    let rows = fee_rows(fees.as_ref(), args.max);
    tracing::debug!("{} fee rows for policy {}", rows.len(), policy);

    let text = match format {
        OutputFormat::Json => render_json(&rows)?,
        OutputFormat::Table => render_table(&rows),
    };
    write_output(&text, None)?;
    Ok(())
}

fn fee_rows(fees: &dyn FeeSchedule, max: u32) -> Vec<FeeRow> {
    (1..=max)
        .filter_map(|parcels| {
            let rate = fees.rate(parcels)?;
            let net = (Decimal::ONE - rate) * Decimal::ONE_HUNDRED;
            Some(FeeRow {
                parcels,
                rate: format!("{:.2}%", rate * Decimal::ONE_HUNDRED),
                net_per_hundred: format!("{:.2}", net),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use receivables_schedule::LinearFee;

    #[test]
    fn test_fixed_rows_stop_at_table_end() {
        let rows = fee_rows(&FixedFeeTable::standard(), 30);
        assert_eq!(rows.len(), 21);
        assert_eq!(rows[0].rate, "2.00%");
        assert_eq!(rows[0].net_per_hundred, "98.00");
        assert_eq!(rows[20].rate, "22.00%");
    }

    #[test]
    fn test_linear_rows_continue() {
        let rows = fee_rows(&LinearFee::default(), 25);
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[24].rate, "26.00%");
        assert_eq!(rows[24].net_per_hundred, "74.00");
    }
}
