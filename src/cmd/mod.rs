pub mod dividend;
pub mod s455;
pub mod schema;
pub mod vouchers;
pub mod years;

use anyhow::Context;
use dividify::tax::{vouchers as voucher_io, DividendVoucher, TaxYearConfig, Warning, TAX_YEARS};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Tax year label used when none is given: the latest year in the rates table
pub fn latest_tax_year() -> String {
    TAX_YEARS
        .last()
        .unwrap_or_else(TaxYearConfig::default_year)
        .tax_year
        .display()
}

/// Read dividend vouchers (CSV or JSON) from a file, or stdin with "-"
pub fn read_vouchers(path: &Path) -> anyhow::Result<Vec<DividendVoucher>> {
    if path.as_os_str() == "-" {
        return read_from_stdin();
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let vouchers = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => voucher_io::read_json(reader),
        // Default to CSV for .csv files and any other extension
        _ => voucher_io::read_csv(reader),
    }
    .with_context(|| format!("reading vouchers from {}", path.display()))?;

    if vouchers.is_empty() {
        anyhow::bail!("No vouchers found in {}", path.display());
    }
    Ok(vouchers)
}

fn read_from_stdin() -> anyhow::Result<Vec<DividendVoucher>> {
    let mut buffer = Vec::new();
    io::stdin().lock().read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    // JSON input always starts with an object
    let vouchers = if buffer.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{') {
        voucher_io::read_json(buffer.as_slice())?
    } else {
        voucher_io::read_csv(buffer.as_slice())?
    };
    if vouchers.is_empty() {
        anyhow::bail!("No vouchers found on stdin");
    }
    Ok(vouchers)
}

pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

pub fn format_gbp(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-£{:.2}", amount.abs())
    } else {
        format!("£{:.2}", amount)
    }
}

/// Rate as a percentage, e.g. 0.0875 -> "8.75%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

pub fn format_percent(pct: Decimal) -> String {
    format!("{:.2}%", pct.round_dp(2))
}
