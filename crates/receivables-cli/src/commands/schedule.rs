//! Schedule command implementation.
//!
//! Reads transactions, builds their receivables schedules and prints them.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use receivables_config::{ScheduleConfig, Validate};
use receivables_core::calendars::HolidayCalendar;
use receivables_schedule::input::read_transactions;
use receivables_schedule::{ReceivablesSchedule, ScheduleBuilder, Transaction, TransactionRecord};

use crate::cli::{FeePolicyChoice, OutputFormat};
use crate::commands::parse_date;
use crate::error::CliError;
use crate::output::{
    print_error, print_success, print_warning, render_json, render_table, write_output,
    InstallmentRow,
};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Transactions file (one JSON object or an array); "-" reads stdin
    #[arg(default_value = "base.json")]
    pub input: String,

    /// JSON holiday file (document or array of YYYY-MM-DD dates)
    #[arg(long)]
    pub holidays: Option<PathBuf>,

    /// Extra holiday (repeatable)
    #[arg(long = "holiday", value_name = "YYYY-MM-DD")]
    pub holiday: Vec<String>,

    /// Anticipation fee policy [default: fixed-table]
    #[arg(long, value_enum)]
    pub fee_policy: Option<FeePolicyChoice>,

    /// Omit transaction_date from the output
    #[arg(long)]
    pub no_transaction_date: bool,

    /// Maximum days a due date may roll forward
    #[arg(long)]
    pub max_rollover_days: Option<u32>,

    /// Schedule every valid transaction and report the failures
    #[arg(long)]
    pub keep_going: bool,

    /// Configuration file (.toml or .json)
    #[arg(short, long, env = "RECEIVABLES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let (config, base_dir) = load_config(&args)?;
    let builder = create_builder(&args, &config, base_dir.as_deref())?;

    let records = read_input(&args.input)?;
    tracing::info!("read {} transaction(s) from {}", records.len(), args.input);

    let total = records.len();
    let (schedules, failed) = if args.keep_going {
        build_keep_going(&builder, records)
    } else {
        (build_fail_fast(&builder, records)?, 0)
    };

    let text = match format {
        OutputFormat::Json => render_json(&schedules)?,
        OutputFormat::Table => render_table(&InstallmentRow::from_schedules(&schedules)),
    };
    write_output(&text, args.output.as_deref())?;

    if let Some(path) = &args.output {
        if !quiet {
            print_success(&format!(
                "Wrote {} schedule(s) to {}",
                schedules.len(),
                path.display()
            ));
        }
    }

    if failed > 0 {
        return Err(CliError::PartialFailure { failed, total }.into());
    }
    Ok(())
}

/// Loads the configuration file, if any, and applies command-line overrides.
fn load_config(args: &ScheduleArgs) -> Result<(ScheduleConfig, Option<PathBuf>)> {
    let (mut config, base_dir) = match &args.config {
        Some(path) => {
            let config = ScheduleConfig::from_file(path)?;
            let base = path.parent().map(Path::to_path_buf);
            (config, base)
        }
        None => (ScheduleConfig::default(), None),
    };

    if let Some(choice) = args.fee_policy {
        config.fee_policy = choice.into();
    }
    if args.no_transaction_date {
        config.include_transaction_date = false;
    }
    if let Some(days) = args.max_rollover_days {
        config.max_rollover_days = days;
    }
    for text in &args.holiday {
        parse_date(text)?;
        config.holidays.push(text.clone());
    }

    config.validate_or_error()?;
    tracing::debug!("effective configuration: {:?}", config);
    Ok((config, base_dir))
}

fn create_builder(
    args: &ScheduleArgs,
    config: &ScheduleConfig,
    base_dir: Option<&Path>,
) -> Result<ScheduleBuilder> {
    let mut calendar = config.load_calendar(base_dir)?;
    if let Some(path) = &args.holidays {
        let extra = HolidayCalendar::from_json_file(path)
            .with_context(|| format!("loading holidays from {}", path.display()))?;
        calendar.merge(&extra);
    }

    Ok(ScheduleBuilder::new()
        .with_calendar(calendar)
        .with_fee_policy(config.fee_policy)
        .with_options(config.to_options()))
}

fn read_input(input: &str) -> Result<Vec<TransactionRecord>> {
    let records = if input == "-" {
        read_transactions(std::io::stdin().lock())?
    } else {
        let file = std::fs::File::open(input).map_err(|e| CliError::Input {
            path: input.to_string(),
            message: e.to_string(),
        })?;
        read_transactions(std::io::BufReader::new(file))?
    };
    Ok(records)
}

fn build_fail_fast(
    builder: &ScheduleBuilder,
    records: Vec<TransactionRecord>,
) -> Result<Vec<ReceivablesSchedule>> {
    let transactions = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_transaction()
                .with_context(|| format!("transaction #{}", index))
        })
        .collect::<Result<Vec<Transaction>>>()?;

    Ok(builder.build_all(&transactions)?)
}

fn build_keep_going(
    builder: &ScheduleBuilder,
    records: Vec<TransactionRecord>,
) -> (Vec<ReceivablesSchedule>, usize) {
    let mut schedules = Vec::with_capacity(records.len());
    let mut failed = 0;

    let mut transactions = Vec::with_capacity(records.len());
    let mut positions = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match record.into_transaction() {
            Ok(tx) => {
                transactions.push(tx);
                positions.push(index);
            }
            Err(err) => {
                failed += 1;
                print_error(&format!("transaction #{}: {}", index, err));
            }
        }
    }

    for (index, result) in positions.into_iter().zip(builder.build_each(&transactions)) {
        match result {
            Ok(schedule) => schedules.push(schedule),
            Err(err) => {
                failed += 1;
                print_error(&format!("transaction #{}: {}", index, err));
            }
        }
    }

    if failed > 0 {
        print_warning(&format!(
            "{} transaction(s) skipped, {} scheduled",
            failed,
            schedules.len()
        ));
    }
    (schedules, failed)
}
