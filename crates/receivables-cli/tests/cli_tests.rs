//! End-to-end tests for the `receivables` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

const TRANSACTIONS: &str = r#"[
  {
    "nsu": "000111",
    "status": "Aprovada",
    "brand": "Visa",
    "gateway_name": "Stone",
    "merchant_issuer_specific_id": "M-01",
    "product_name": "Crédito",
    "resolution_type": "Automática",
    "payment_date": "2024-01-02T00:00:00Z",
    "value": 10000,
    "parcels": 3
  },
  {
    "nsu": "000222",
    "status": "Aprovada",
    "brand": "Master",
    "product_name": "Débito",
    "payment_date": "2024-03-01T00:00:00Z",
    "value": 5000
  }
]"#;

fn receivables() -> Command {
    Command::cargo_bin("receivables").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn schedules_base_json_in_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "base.json", TRANSACTIONS);

    let output = receivables()
        .current_dir(dir.path())
        .arg("schedule")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value = stdout_json(&output);
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(
        value[0]["original_installments"],
        json!([
            {"installment": 1, "due_date": "2024-02-01", "amount": "33.34"},
            {"installment": 2, "due_date": "2024-03-04", "amount": "33.33"},
            {"installment": 3, "due_date": "2024-04-01", "amount": "33.33"}
        ])
    );
    assert_eq!(value[0]["new_installment"]["amount"], json!("96.00"));
    assert_eq!(value[0]["transaction_date"], json!("2024-01-02"));
    assert_eq!(value[1]["original_installments"][0]["due_date"], json!("2024-03-04"));
}

#[test]
fn json_output_is_indented_and_keeps_accents() {
    receivables()
        .args(["schedule", "-"])
        .write_stdin(TRANSACTIONS)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[\n  {\n    \"nsu\": \"000111\""))
        .stdout(predicate::str::contains("\"credit_or_debit\": \"Crédito\""))
        .stdout(predicate::str::contains("\"resolution_type\": \"Automática\""));
}

#[test]
fn single_object_input() {
    let single = r#"{"nsu": 5, "status": "Aprovada", "brand": "Elo",
                     "product_name": "débito", "payment_date": "2024-03-01", "value": 1}"#;
    let output = receivables()
        .args(["schedule", "-"])
        .write_stdin(single)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value[0]["nsu"], json!(5));
    assert_eq!(value[0]["original_installments"][0]["amount"], json!("0.01"));
}

#[test]
fn holidays_from_file_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "tx.json", TRANSACTIONS);
    let holidays = write(dir.path(), "holidays.json", r#"["2024-03-04"]"#);

    let output = receivables()
        .args(["schedule", &input, "--holidays", &holidays, "--holiday", "2024-03-05"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value[1]["original_installments"][0]["due_date"], json!("2024-03-06"));
}

#[test]
fn no_transaction_date_flag() {
    let output = receivables()
        .args(["schedule", "-", "--no-transaction-date"])
        .write_stdin(TRANSACTIONS)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert!(value[0].get("transaction_date").is_none());
}

#[test]
fn fixed_table_rejects_22_installments() {
    let tx = r#"{"nsu": "9", "status": "Aprovada", "brand": "Visa", "product_name": "Crédito",
                 "resolution_type": "Automática", "payment_date": "2024-01-02",
                 "value": 10000, "parcels": 22}"#;

    receivables()
        .args(["schedule", "-"])
        .write_stdin(tx)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported installment count 22"));

    receivables()
        .args(["schedule", "-", "--fee-policy", "linear"])
        .write_stdin(tx)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": \"77.00\""));
}

#[test]
fn keep_going_reports_failures() {
    let input = r#"[
        {"nsu": "1", "status": "Aprovada", "brand": "Visa", "product_name": "Pix",
         "payment_date": "2024-01-02", "value": 100},
        {"nsu": "2", "status": "Aprovada", "brand": "Visa", "product_name": "Débito",
         "payment_date": "2024-01-02", "value": 100},
        {"nsu": "3", "status": "Aprovada", "brand": "Visa", "product_name": "Débito",
         "value": 100}
    ]"#;

    receivables()
        .args(["schedule", "-"])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("transaction #0"));

    let output = receivables()
        .args(["schedule", "-", "--keep-going"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value = stdout_json(&output);
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["nsu"], json!("2"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required field 'payment_date'"));
    assert!(stderr.contains("2 of 3 transaction(s) failed"));
}

#[test]
fn config_file_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "tx.json", TRANSACTIONS);
    write(dir.path(), "holidays.json", r#"{"name": "Local", "holidays": ["2024-03-04"]}"#);
    let config = write(
        dir.path(),
        "receivables.toml",
        "include_transaction_date = false\nholidays_file = \"holidays.json\"\n",
    );
    let out = dir.path().join("out.json");

    receivables()
        .args(["schedule", &input, "--config", &config, "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote 2 schedule(s)"));

    let value: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!(value[0].get("transaction_date").is_none());
    assert_eq!(value[1]["original_installments"][0]["due_date"], json!("2024-03-05"));
}

#[test]
fn table_format() {
    receivables()
        .args(["schedule", "-", "-f", "table"])
        .write_stdin(TRANSACTIONS)
        .assert()
        .success()
        .stdout(predicate::str::contains("anticipated"))
        .stdout(predicate::str::contains("96.00"))
        .stdout(predicate::str::contains("2024-04-01"));
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    receivables()
        .current_dir(dir.path())
        .arg("schedule")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot read base.json"));
}

#[test]
fn out_of_range_inputs_fail_cleanly() {
    let input = r#"[
        {"nsu": "1", "status": "Aprovada", "brand": "Visa", "product_name": "Crédito",
         "payment_date": "2024-01-02T00:00:00Z", "value": 10000, "parcels": 4000000},
        {"nsu": "2", "status": "Aprovada", "brand": "Visa", "product_name": "Débito",
         "payment_date": "+262142-12-31T00:00:00Z", "value": 100},
        {"nsu": "3", "status": null, "brand": "Visa", "product_name": "Débito",
         "payment_date": "2024-01-02", "value": 100}
    ]"#;

    let output = receivables()
        .args(["schedule", "-", "--keep-going"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported installment count 4000000 (supported: 1-1200)"));
    assert!(stderr.contains("Transaction 2: due date out of range"));
    assert!(stderr.contains("2 of 3 transaction(s) failed"));

    let value = stdout_json(&output);
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["status"], Value::Null);
}

#[test]
fn malformed_json_input() {
    receivables()
        .args(["schedule", "-"])
        .write_stdin("[{\"nsu\": ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn invalid_holiday_flag() {
    receivables()
        .args(["schedule", "-", "--holiday", "25/12/2024"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format: 25/12/2024"));
}

#[test]
fn fees_command() {
    let output = receivables().arg("fees").output().unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value.as_array().unwrap().len(), 21);
    assert_eq!(value[0], json!({"parcels": 1, "rate": "2.00%", "net_per_hundred": "98.00"}));

    receivables()
        .args(["fees", "--fee-policy", "linear", "--max", "30", "-f", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("31.00%"));
}
