//! S455 command - corporation tax on an outstanding director's loan

use super::{format_gbp, format_rate, latest_tax_year, print_warnings};
use clap::Args;
use dividify::tax::{calculate_s455_tax, parse_amount};

#[derive(Args, Debug)]
pub struct S455Command {
    /// Outstanding director's loan balance in GBP
    #[arg(short, long, allow_hyphen_values = true)]
    loan: String,

    /// Tax year (e.g. 2025/26), defaults to the latest supported year
    #[arg(short, long)]
    year: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl S455Command {
    pub fn exec(&self) -> anyhow::Result<()> {
        let loan = parse_amount("loan", &self.loan)?;
        let year = self.year.clone().unwrap_or_else(latest_tax_year);

        let result = calculate_s455_tax(loan, &year);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        print_warnings(&result.warnings);
        println!();
        println!("SECTION 455 TAX ({})", result.tax_year);
        println!();
        println!("  Loan outstanding: {}", format_gbp(result.loan_amount));
        println!(
            "  S455 @ {}: {}",
            format_rate(result.tax_rate),
            format_gbp(result.tax_charge)
        );
        println!();
        println!("NET COST TO COMPANY: {}", format_gbp(result.net_cost_to_company));
        println!();
        Ok(())
    }
}
