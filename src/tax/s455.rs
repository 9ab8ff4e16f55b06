use super::uk::{TaxYear, TaxYearConfig};
use super::warnings::Warning;
use rust_decimal::Decimal;
use serde::Serialize;

/// Corporation tax charge on an outstanding director's loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S455Result {
    pub tax_year: TaxYear,
    pub loan_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_charge: Decimal,
    /// Loan plus the charge, the company's cash exposure until repayment.
    /// Saturates at the `Decimal` bounds.
    pub net_cost_to_company: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Flat-rate S455 charge for a tax year label such as "2025/26".
pub fn calculate_s455_tax(loan_amount: Decimal, tax_year: &str) -> S455Result {
    let lookup = TaxYearConfig::lookup(tax_year);
    let mut result = calculate_s455_tax_for(lookup.config, loan_amount);
    if let Some(warning) = lookup.warning {
        result.warnings.insert(0, warning);
    }
    result
}

pub fn calculate_s455_tax_for(config: &TaxYearConfig, loan_amount: Decimal) -> S455Result {
    let mut warnings = Vec::new();
    if loan_amount.is_sign_negative() && !loan_amount.is_zero() {
        warnings.push(Warning::NegativeInput {
            field: "loan_amount".to_string(),
        });
    }

    let tax_charge = loan_amount * config.s455_rate;
    log::debug!(
        "{}: S455 on {} at {} = {}",
        config.tax_year,
        loan_amount,
        config.s455_rate,
        tax_charge
    );

    S455Result {
        tax_year: config.tax_year,
        loan_amount,
        tax_rate: config.s455_rate,
        tax_charge,
        net_cost_to_company: loan_amount.saturating_add(tax_charge),
        warnings,
    }
}
