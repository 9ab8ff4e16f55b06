//! E2E tests for the dividify command line

use std::process::{Command, Output};

fn dividify(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dividify"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Dividend within the basic band
#[test]
fn dividend_basic_rate() {
    let output = dividify(&["dividend", "--gross", "1000", "--year", "2025/26"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("DIVIDEND TAX (2025/26)"));
    assert!(stdout.contains("Basic Rate"));
    assert!(stdout.contains("TOTAL TAX: £43.75"));
    assert!(stdout.contains("NET DIVIDEND: £956.25"));
}

/// JSON output carries every band
#[test]
fn dividend_json_output() {
    let output = dividify(&[
        "dividend",
        "--gross",
        "£50,000",
        "--other-income",
        "130000",
        "--year",
        "2025/26",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tax_year"], "2025/26");
    let bands = json["bands"].as_array().unwrap();
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0]["band"], "Higher");
    assert_eq!(bands[0]["amount"], "7710");
    assert_eq!(bands[1]["band"], "Additional");
    assert_eq!(bands[1]["amount"], "41790");
}

/// Unknown tax year falls back and warns rather than failing
#[test]
fn dividend_unknown_year_warns() {
    let output = dividify(&["dividend", "--gross", "1000", "--year", "1999/00"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("DIVIDEND TAX (2024/25)"));
    assert!(stderr.contains("warning: tax year '1999/00' not recognised"));
}

/// Non-numeric amounts are rejected
#[test]
fn dividend_invalid_amount_fails() {
    let output = dividify(&["dividend", "--gross", "NaN"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid input for gross"));
}

#[test]
fn s455_charge() {
    let output = dividify(&["s455", "--loan", "10000", "--year", "2025/26"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("S455 @ 33.75%: £3375.00"));
    assert!(stdout.contains("NET COST TO COMPANY: £13375.00"));
}

#[test]
fn years_lists_table() {
    let output = dividify(&["years"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("2021/22"));
    assert!(stdout.contains("2025/26"));
    assert!(stdout.contains("Personal allowance: £12570.00"));
}

/// Vouchers are summarised per shareholder and tax year
#[test]
fn vouchers_csv_summary() {
    let output = dividify(&["vouchers", "-f", "tests/data/vouchers.csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("2024/25"));
    assert!(stdout.contains("Jane Smith"));
    assert!(stdout.contains("John Smith"));
    // 87.50 (2024/25) + 831.25 + 675.00
    assert!(stdout.contains("TOTAL DIVIDEND TAX: £1593.75"));
}

#[test]
fn vouchers_filter_by_year_and_shareholder() {
    let output = dividify(&[
        "vouchers",
        "-f",
        "tests/data/vouchers.csv",
        "--year",
        "2025/26",
        "--shareholder",
        "jane smith",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].starts_with("tax_year,shareholder,vouchers"));
    assert!(lines[1].starts_with("2025/26,Jane Smith,2,10000.00"));
}

#[test]
fn vouchers_json_input() {
    let output = dividify(&["vouchers", "-f", "tests/data/vouchers.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summaries = json.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["shareholder"], "Priya Patel");
    assert_eq!(summaries[0]["voucher_count"], 2);
    assert_eq!(summaries[0]["result"]["gross_dividend"], "40000");
}

#[test]
fn vouchers_missing_file_fails() {
    let output = dividify(&["vouchers", "-f", "tests/data/missing.csv"]);
    assert!(!output.status.success());
}

#[test]
fn schema_csv_header() {
    let output = dividify(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout.trim(),
        "id,shareholder,payment_date,gross_amount,other_income"
    );
}

#[test]
fn schema_json() {
    let output = dividify(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"vouchers\""));
    assert!(stdout.contains("\"payment_date\""));
}

/// Amounts beyond the supported range are rejected instead of overflowing
#[test]
fn s455_huge_loan_rejected() {
    let output = dividify(&["s455", "--loan", "79228162514264337593543950335"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("exceeds the maximum"), "{stderr}");
    assert!(!stderr.contains("overflowed"), "{stderr}");
}

#[test]
fn dividend_most_negative_amount_rejected() {
    let output = dividify(&["dividend", "--gross", "-79228162514264337593543950335"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("exceeds the maximum"), "{stderr}");
}

/// Negative amounts can be passed as separate arguments and produce a warning
#[test]
fn dividend_negative_gross_warns() {
    let output = dividify(&["dividend", "--gross", "-1000", "--other-income", "-50"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("No dividend tax due"));
    assert!(stderr.contains("warning: gross_dividend is negative"));
    assert!(stderr.contains("warning: other_income is negative"));
}

#[test]
fn s455_negative_loan_warns() {
    let output = dividify(&["s455", "--loan", "-100", "--year", "2025/26"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stderr.contains("warning: loan_amount is negative"));
}

#[test]
fn years_show_start_and_end_dates() {
    let output = dividify(&["years"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("6 Apr 2025"));
    assert!(stdout.contains("5 Apr 2026"));
}

#[test]
fn vouchers_bad_date_reported() {
    let output = dividify(&["vouchers", "-f", "tests/data/bad_date.csv"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("invalid date for payment_date: '31/05/2025', expected YYYY-MM-DD"),
        "{stderr}"
    );
}
