//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use receivables_schedule::FeePolicy;

use crate::commands::{FeesArgs, ScheduleArgs};

/// Receivables - card transaction settlement schedules
#[derive(Parser)]
#[command(name = "receivables")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build receivables schedules from a transactions file
    Schedule(ScheduleArgs),

    /// Show the anticipation fee table of a policy
    Fees(FeesArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty JSON (2-space indent)
    #[default]
    Json,
    /// Human-readable table format
    Table,
}

/// Fee policy choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeePolicyChoice {
    /// 2% for one installment up to 22% for 21
    FixedTable,
    /// 2% plus one point per extra installment, unbounded
    Linear,
}

impl From<FeePolicyChoice> for FeePolicy {
    fn from(choice: FeePolicyChoice) -> Self {
        match choice {
            FeePolicyChoice::FixedTable => FeePolicy::FixedTable,
            FeePolicyChoice::Linear => FeePolicy::Linear,
        }
    }
}
