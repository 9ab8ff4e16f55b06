//! Per-shareholder dividend tax from issued dividend vouchers.

use super::dividend::{calculate_dividend_tax_for, DividendTaxResult};
use super::error::{check_amount, CalcError};
use super::uk::{TaxYear, TaxYearConfig};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// One dividend payment to one shareholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendVoucher {
    pub id: Option<String>,
    pub shareholder: String,
    pub payment_date: NaiveDate,
    pub gross_amount: Decimal,
    pub other_income: Option<Decimal>,
}

/// Voucher as it appears in CSV or JSON input, before validation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VoucherRecord {
    /// Voucher reference, for linking back to the issued document
    #[serde(default)]
    pub id: Option<String>,
    /// Shareholder name as printed on the voucher
    pub shareholder: String,
    /// Date the dividend was paid (YYYY-MM-DD)
    pub payment_date: String,
    /// Gross dividend paid in GBP
    #[schemars(with = "f64")]
    pub gross_amount: Decimal,
    /// Shareholder's other taxable income for the year (salary etc.)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub other_income: Option<Decimal>,
}

/// JSON input wrapper
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VoucherInput {
    pub vouchers: Vec<VoucherRecord>,
}

/// Dividend tax for one shareholder across one tax year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareholderYearSummary {
    pub shareholder: String,
    pub tax_year: TaxYear,
    pub voucher_count: usize,
    pub first_payment: NaiveDate,
    pub last_payment: NaiveDate,
    pub result: DividendTaxResult,
}

impl DividendVoucher {
    pub fn tax_year(&self) -> TaxYear {
        TaxYear::from_date(self.payment_date)
    }
}

impl TryFrom<VoucherRecord> for DividendVoucher {
    type Error = CalcError;

    fn try_from(record: VoucherRecord) -> Result<Self, Self::Error> {
        let shareholder = record.shareholder.trim().to_string();
        if shareholder.is_empty() {
            return Err(CalcError::invalid_input("shareholder", "name is empty"));
        }
        let reference = record.id.clone().unwrap_or_else(|| shareholder.clone());

        let date = record.payment_date.trim();
        let payment_date =
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| CalcError::InvalidDate {
                field: "payment_date".to_string(),
                value: date.to_string(),
            })?;

        let gross_amount = check_amount("gross_amount", record.gross_amount)?;
        if gross_amount.is_sign_negative() && !gross_amount.is_zero() {
            return Err(CalcError::invalid_input(
                "gross_amount",
                format!("voucher {reference} has a negative amount {gross_amount}"),
            ));
        }

        let other_income = match record.other_income {
            Some(other) => {
                let other = check_amount("other_income", other)?;
                if other.is_sign_negative() && !other.is_zero() {
                    return Err(CalcError::invalid_input(
                        "other_income",
                        format!("voucher {reference} has negative other income {other}"),
                    ));
                }
                Some(other)
            }
            None => None,
        };

        Ok(DividendVoucher {
            id: record.id,
            shareholder,
            payment_date,
            gross_amount,
            other_income,
        })
    }
}

/// Read vouchers from CSV with headers `id,shareholder,payment_date,gross_amount,other_income`
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<DividendVoucher>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records: Result<Vec<VoucherRecord>, _> = rdr.deserialize().collect();
    finish(records?)
}

/// Read vouchers from JSON (`{"vouchers": [...]}`)
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Vec<DividendVoucher>> {
    let input: VoucherInput = serde_json::from_reader(reader)?;
    finish(input.vouchers)
}

fn finish(records: Vec<VoucherRecord>) -> anyhow::Result<Vec<DividendVoucher>> {
    let mut vouchers = records
        .into_iter()
        .map(DividendVoucher::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    vouchers.sort_by_key(|v| v.payment_date);
    log::info!("Read {} dividend vouchers", vouchers.len());
    Ok(vouchers)
}

#[derive(Default)]
struct Group {
    gross: Decimal,
    other_income: Option<Decimal>,
    count: usize,
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
}

/// Total vouchers per shareholder and tax year, then calculate dividend tax
/// on each total. Ordered by tax year, then shareholder.
///
/// Fails if a group's total overflows `Decimal`.
pub fn summarise_vouchers(
    vouchers: &[DividendVoucher],
) -> Result<Vec<ShareholderYearSummary>, CalcError> {
    let mut groups: BTreeMap<(TaxYear, String), Group> = BTreeMap::new();

    for voucher in vouchers {
        let tax_year = voucher.tax_year();
        let group = groups
            .entry((tax_year, voucher.shareholder.trim().to_string()))
            .or_default();
        group.gross = group
            .gross
            .checked_add(voucher.gross_amount)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "gross_amount",
                    format!("total for {} in {} overflows", voucher.shareholder, tax_year),
                )
            })?;
        // Other income describes the whole year, not the payment
        group.other_income = match (group.other_income, voucher.other_income) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        group.count += 1;
        group.first = Some(group.first.map_or(voucher.payment_date, |d| d.min(voucher.payment_date)));
        group.last = Some(group.last.map_or(voucher.payment_date, |d| d.max(voucher.payment_date)));
    }

    let summaries = groups
        .into_iter()
        .filter_map(|((tax_year, shareholder), group)| {
            let (first_payment, last_payment) = (group.first?, group.last?);
            let lookup = TaxYearConfig::resolve(tax_year);
            let mut result = calculate_dividend_tax_for(
                lookup.config,
                group.gross,
                group.other_income.unwrap_or(Decimal::ZERO),
            );
            if let Some(warning) = lookup.warning {
                result.warnings.insert(0, warning);
            }
            log::debug!(
                "{} {}: {} vouchers, gross {}, tax {}",
                tax_year,
                shareholder,
                group.count,
                group.gross,
                result.total_tax
            );
            Some(ShareholderYearSummary {
                shareholder,
                tax_year,
                voucher_count: group.count,
                first_payment,
                last_payment,
                result,
            })
        })
        .collect();
    Ok(summaries)
}
