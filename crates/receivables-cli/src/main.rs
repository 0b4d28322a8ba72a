//! Receivables CLI - settlement schedules for card transactions.
//!
//! # Usage
//!
//! ```bash
//! # Schedule every transaction in base.json
//! receivables schedule
//!
//! # Read stdin, add holidays, show a table
//! cat transactions.json | receivables schedule - --holidays holidays.json -f table
//!
//! # Linear fees, no transaction_date, write to a file
//! receivables schedule base.json --fee-policy linear --no-transaction-date -o out.json
//!
//! # Show the fee table
//! receivables fees -f table
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str =
    "receivables_cli=debug,receivables_schedule=debug,receivables_config=debug,receivables_core=info";

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let result = match cli.command {
        Commands::Schedule(args) => commands::schedule::execute(args, format, cli.quiet),
        Commands::Fees(args) => commands::fees::execute(args, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
