//! Vouchers command - dividend tax per shareholder from issued vouchers

use super::{format_gbp, format_percent, print_warnings, read_vouchers};
use clap::Args;
use dividify::tax::{summarise_vouchers, ShareholderYearSummary, TaxYear};
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct VouchersCommand {
    /// CSV or JSON file of dividend vouchers ("-" for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Only show this tax year (e.g. 2025/26)
    #[arg(short, long, value_parser = parse_tax_year)]
    year: Option<TaxYear>,

    /// Only show this shareholder
    #[arg(short, long)]
    shareholder: Option<String>,

    /// Output as JSON instead of formatted table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

fn parse_tax_year(s: &str) -> Result<TaxYear, String> {
    TaxYear::parse(s).map_err(|e| e.to_string())
}

/// Row for table and CSV output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
struct SummaryRow {
    #[tabled(rename = "Tax Year")]
    tax_year: String,
    #[tabled(rename = "Shareholder")]
    shareholder: String,
    #[tabled(rename = "Vouchers")]
    vouchers: usize,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Tax-free")]
    tax_free: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Effective")]
    effective_rate: String,
}

impl From<&ShareholderYearSummary> for SummaryRow {
    fn from(s: &ShareholderYearSummary) -> Self {
        SummaryRow {
            tax_year: s.tax_year.display(),
            shareholder: s.shareholder.clone(),
            vouchers: s.voucher_count,
            gross: format!("{:.2}", s.result.gross_dividend),
            tax_free: format!("{:.2}", s.result.tax_free_amount),
            taxable: format!("{:.2}", s.result.taxable_dividend),
            tax: format!("{:.2}", s.result.total_tax),
            net: format!("{:.2}", s.result.net_dividend),
            effective_rate: format_percent(s.result.effective_rate),
        }
    }
}

impl VouchersCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let vouchers = read_vouchers(&self.file)?;

        let summaries: Vec<ShareholderYearSummary> = summarise_vouchers(&vouchers)?
            .into_iter()
            .filter(|s| self.year.is_none_or(|y| s.tax_year == y))
            .filter(|s| {
                self.shareholder
                    .as_ref()
                    .is_none_or(|name| s.shareholder.eq_ignore_ascii_case(name.trim()))
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
        if self.csv {
            return write_csv(&rows);
        }

        for summary in &summaries {
            print_warnings(&summary.result.warnings);
        }
        if rows.is_empty() {
            println!("No vouchers found matching filters");
            return Ok(());
        }

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        let total_tax: Decimal = summaries.iter().map(|s| s.result.total_tax).sum();
        println!();
        println!("TOTAL DIVIDEND TAX: {}", format_gbp(total_tax));
        Ok(())
    }
}

fn write_csv(rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
