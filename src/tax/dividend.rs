//! Dividend tax band allocation.
//!
//! Other income fills the bands first (after the personal allowance), then
//! the taxable part of the dividend is stacked on top: basic, higher,
//! additional.

use super::uk::{TaxBand, TaxYear, TaxYearConfig, PERSONAL_ALLOWANCE};
use super::warnings::Warning;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Portion of a dividend taxed in one marginal band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendTaxBand {
    pub band: TaxBand,
    pub label: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

impl DividendTaxBand {
    fn new(config: &TaxYearConfig, band: TaxBand, amount: Decimal) -> Self {
        let rate = config.rate(band);
        DividendTaxBand {
            band,
            label: band.label(rate),
            amount,
            rate,
            tax: amount * rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendTaxResult {
    /// Tax year whose rates were applied
    pub tax_year: TaxYear,
    pub gross_dividend: Decimal,
    pub other_income: Decimal,
    pub tax_free_amount: Decimal,
    pub taxable_dividend: Decimal,
    /// Populated bands in basic, higher, additional order
    pub bands: Vec<DividendTaxBand>,
    pub total_tax: Decimal,
    pub net_dividend: Decimal,
    /// Percentage of the gross dividend paid in tax
    pub effective_rate: Decimal,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl DividendTaxResult {
    pub fn band(&self, band: TaxBand) -> Option<&DividendTaxBand> {
        self.bands.iter().find(|b| b.band == band)
    }
}

/// Calculate dividend tax for a tax year label such as "2025/26".
///
/// Unknown years fall back to the default rates with a warning.
pub fn calculate_dividend_tax(
    gross_dividend: Decimal,
    other_income: Decimal,
    tax_year: &str,
) -> DividendTaxResult {
    let lookup = TaxYearConfig::lookup(tax_year);
    let mut result = calculate_dividend_tax_for(lookup.config, gross_dividend, other_income);
    if let Some(warning) = lookup.warning {
        result.warnings.insert(0, warning);
    }
    result
}

/// Calculate dividend tax against an explicit rates configuration.
pub fn calculate_dividend_tax_for(
    config: &TaxYearConfig,
    gross_dividend: Decimal,
    other_income: Decimal,
) -> DividendTaxResult {
    let mut warnings = Vec::new();
    if gross_dividend.is_sign_negative() && !gross_dividend.is_zero() {
        warnings.push(Warning::NegativeInput {
            field: "gross_dividend".to_string(),
        });
    }
    if other_income.is_sign_negative() && !other_income.is_zero() {
        warnings.push(Warning::NegativeInput {
            field: "other_income".to_string(),
        });
    }

    let tax_free_amount = gross_dividend.min(config.dividend_allowance);
    // Saturating so amounts near Decimal::MIN clamp to zero instead of overflowing
    let taxable_dividend = gross_dividend
        .saturating_sub(config.dividend_allowance)
        .max(Decimal::ZERO);
    let taxable_other_income = other_income
        .saturating_sub(PERSONAL_ALLOWANCE)
        .max(Decimal::ZERO);

    log::debug!(
        "{}: gross {}, allowance {}, taxable {}, taxable other income {}",
        config.tax_year,
        gross_dividend,
        tax_free_amount,
        taxable_dividend,
        taxable_other_income
    );

    let mut bands = Vec::with_capacity(3);
    let mut remaining = taxable_dividend;

    let basic_rate_space = (config.basic_rate_threshold - taxable_other_income).max(Decimal::ZERO);
    if remaining > Decimal::ZERO && basic_rate_space > Decimal::ZERO {
        let amount = remaining.min(basic_rate_space);
        log::debug!("Basic rate: {} of {} space", amount, basic_rate_space);
        bands.push(DividendTaxBand::new(config, TaxBand::Basic, amount));
        remaining -= amount;
    }

    let higher_rate_space = config.additional_rate_threshold - config.basic_rate_threshold;
    let used_higher_rate = (taxable_other_income - config.basic_rate_threshold).max(Decimal::ZERO);
    let available_higher_rate = (higher_rate_space - used_higher_rate).max(Decimal::ZERO);
    if remaining > Decimal::ZERO && available_higher_rate > Decimal::ZERO {
        let amount = remaining.min(available_higher_rate);
        log::debug!(
            "Higher rate: {} of {} available ({} used by other income)",
            amount,
            available_higher_rate,
            used_higher_rate
        );
        bands.push(DividendTaxBand::new(config, TaxBand::Higher, amount));
        remaining -= amount;
    }

    if remaining > Decimal::ZERO {
        log::debug!("Additional rate: {}", remaining);
        bands.push(DividendTaxBand::new(config, TaxBand::Additional, remaining));
    }

    let total_tax: Decimal = bands.iter().map(|b| b.tax).sum();
    let net_dividend = gross_dividend - total_tax;
    let effective_rate = if gross_dividend > Decimal::ZERO {
        total_tax / gross_dividend * dec!(100)
    } else {
        Decimal::ZERO
    };

    DividendTaxResult {
        tax_year: config.tax_year,
        gross_dividend,
        other_income,
        tax_free_amount,
        taxable_dividend,
        bands,
        total_tax,
        net_dividend,
        effective_rate,
        warnings,
    }
}
