//! Dividend command - tax on a single dividend given other income

use super::{format_gbp, format_percent, format_rate, latest_tax_year, print_warnings};
use clap::Args;
use dividify::tax::{calculate_dividend_tax, parse_amount, DividendTaxResult};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct DividendCommand {
    /// Gross dividend in GBP (e.g. 25000 or £25,000)
    #[arg(short, long, allow_hyphen_values = true)]
    gross: String,

    /// Other taxable income for the year, e.g. salary
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    other_income: String,

    /// Tax year (e.g. 2025/26), defaults to the latest supported year
    #[arg(short, long)]
    year: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl DividendCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let gross = parse_amount("gross", &self.gross)?;
        let other_income = parse_amount("other-income", &self.other_income)?;
        let year = self.year.clone().unwrap_or_else(latest_tax_year);

        let result = calculate_dividend_tax(gross, other_income, &year);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_warnings(&result.warnings);
            print_result(&result);
        }
        Ok(())
    }
}

fn print_result(result: &DividendTaxResult) {
    println!();
    println!("DIVIDEND TAX ({})", result.tax_year);
    println!();
    println!(
        "  Gross dividend: {} | Other income: {}",
        format_gbp(result.gross_dividend),
        format_gbp(result.other_income)
    );
    println!(
        "  Tax-free (allowance): {} | Taxable: {}",
        format_gbp(result.tax_free_amount),
        format_gbp(result.taxable_dividend)
    );
    println!();

    if result.bands.is_empty() {
        println!("  No dividend tax due");
    } else {
        let rows: Vec<BandRow> = result
            .bands
            .iter()
            .map(|b| BandRow {
                band: b.band.name().to_string(),
                amount: format_gbp(b.amount),
                rate: format_rate(b.rate),
                tax: format_gbp(b.tax),
            })
            .collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
    println!();
    println!("TOTAL TAX: {}", format_gbp(result.total_tax));
    println!("NET DIVIDEND: {}", format_gbp(result.net_dividend));
    println!("EFFECTIVE RATE: {}", format_percent(result.effective_rate));
    println!();
}
