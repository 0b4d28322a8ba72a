//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use receivables_schedule::ReceivablesSchedule;

use crate::error::CliResult;

/// Renders data as pretty JSON: 2-space indent, non-ASCII kept as is.
pub fn render_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Renders rows as a rounded table.
pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "No results.".to_string();
    }

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

/// Writes rendered output to a file, or to stdout when no path is given.
pub fn write_output(text: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(path) => {
            let mut content = text.to_string();
            content.push('\n');
            std::fs::write(path, content)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// One installment of a schedule, for table output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct InstallmentRow {
    #[tabled(rename = "NSU")]
    pub nsu: String,
    #[tabled(rename = "Product")]
    pub product: String,
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "#")]
    pub installment: u32,
    #[tabled(rename = "Due date")]
    pub due_date: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
}

impl InstallmentRow {
    /// Flattens schedules into one row per installment, anticipated payout
    /// last.
    pub fn from_schedules(schedules: &[ReceivablesSchedule]) -> Vec<Self> {
        let mut rows = Vec::new();
        for schedule in schedules {
            let nsu = schedule.nsu.to_string();
            let original = schedule
                .original_installments
                .iter()
                .map(|i| ("original", i));
            let anticipated = schedule.new_installment.iter().map(|i| ("anticipated", i));
            for (kind, installment) in original.chain(anticipated) {
                rows.push(Self {
                    nsu: nsu.clone(),
                    product: schedule.credit_or_debit.clone(),
                    kind,
                    installment: installment.installment,
                    due_date: installment.due_date.to_string(),
                    amount: installment.amount.to_string(),
                });
            }
        }
        rows
    }
}

/// One fee table entry.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct FeeRow {
    #[tabled(rename = "Installments")]
    pub parcels: u32,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Net per 100.00")]
    pub net_per_hundred: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use receivables_schedule::{ScheduleBuilder, Transaction};

    #[test]
    fn test_rows_include_anticipation() {
        let tx = Transaction::new("9", "Aprovada", "Visa", "Crédito", "2024-01-02", 10000)
            .with_parcels(2)
            .with_resolution_type("Automática");
        let schedule = ScheduleBuilder::new().build(&tx).unwrap();
        let rows = InstallmentRow::from_schedules(&[schedule]);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, "original");
        assert_eq!(rows[2].kind, "anticipated");
        assert_eq!(rows[2].amount, "97.00");
    }

    #[test]
    fn test_render_json_keeps_accents() {
        let text = render_json(&serde_json::json!({"product": "Crédito"})).unwrap();
        assert_eq!(text, "{\n  \"product\": \"Crédito\"\n}");
    }

    #[test]
    fn test_empty_table() {
        let rows: Vec<FeeRow> = Vec::new();
        assert_eq!(render_table(&rows), "No results.");
    }
}
