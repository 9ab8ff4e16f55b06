//! Years command - list the rates table

use super::{format_gbp, format_rate};
use chrono::NaiveDate;
use clap::Args;
use dividify::tax::{tax_years, DEFAULT_TAX_YEAR, PERSONAL_ALLOWANCE};
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct YearsCommand {
    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct YearRow {
    #[tabled(rename = "Tax Year")]
    tax_year: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Ends")]
    ends: String,
    #[tabled(rename = "Allowance")]
    allowance: String,
    #[tabled(rename = "Basic Band")]
    basic_threshold: String,
    #[tabled(rename = "Additional From")]
    additional_threshold: String,
    #[tabled(rename = "Basic")]
    basic_rate: String,
    #[tabled(rename = "Higher")]
    higher_rate: String,
    #[tabled(rename = "Additional")]
    additional_rate: String,
    #[tabled(rename = "S455")]
    s455_rate: String,
}

impl YearsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.json {
            let years: Vec<_> = tax_years().collect();
            println!("{}", serde_json::to_string_pretty(&years)?);
            return Ok(());
        }

        let rows: Vec<YearRow> = tax_years()
            .map(|c| YearRow {
                tax_year: c.tax_year.display(),
                starts: format_date(c.tax_year.start_date()),
                ends: format_date(c.tax_year.end_date()),
                allowance: format_gbp(c.dividend_allowance),
                basic_threshold: format_gbp(c.basic_rate_threshold),
                additional_threshold: format_gbp(c.additional_rate_threshold),
                basic_rate: format_rate(c.basic_rate),
                higher_rate: format_rate(c.higher_rate),
                additional_rate: format_rate(c.additional_rate),
                s455_rate: format_rate(c.s455_rate),
            })
            .collect();

        println!("{}", Table::new(rows).with(Style::rounded()));
        println!();
        println!("Personal allowance: {}", format_gbp(PERSONAL_ALLOWANCE));
        println!("Unrecognised years use {} rates", DEFAULT_TAX_YEAR);
        Ok(())
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(String::new, |d| d.format("%-d %b %Y").to_string())
}
