use super::error::CalcError;
use super::warnings::Warning;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Income not subject to income tax; also consumes the bottom of the
/// basic-rate band for dividend purposes.
pub const PERSONAL_ALLOWANCE: Decimal = dec!(12570);

/// Rates applied when a requested tax year is not in [`TAX_YEARS`].
pub const DEFAULT_TAX_YEAR: TaxYear = TaxYear(2025);

/// Marginal band for dividend tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TaxBand {
    Basic,
    Higher,
    Additional,
}

impl TaxBand {
    pub fn name(self) -> &'static str {
        match self {
            TaxBand::Basic => "Basic Rate",
            TaxBand::Higher => "Higher Rate",
            TaxBand::Additional => "Additional Rate",
        }
    }

    /// Label shown on vouchers and reports, e.g. "Basic Rate (8.75%)"
    pub fn label(self, rate: Decimal) -> String {
        format!("{} ({}%)", self.name(), (rate * dec!(100)).normalize())
    }
}

/// UK Tax Year (runs 6 April to 5 April)
/// The year value represents the end year (e.g., 2026 = 2025/26 tax year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Parse a "YYYY/YY" label. A bare four digit year is read as the end
    /// year, so "2026" is 2025/26.
    pub fn parse(label: &str) -> Result<Self, CalcError> {
        let invalid = || CalcError::InvalidTaxYear(label.to_string());
        let label = label.trim();

        match label.split_once('/') {
            Some((start, end)) => {
                if start.len() != 4 || end.len() != 2 {
                    return Err(invalid());
                }
                let start: i32 = start.parse().map_err(|_| invalid())?;
                let end: i32 = end.parse().map_err(|_| invalid())?;
                if (start + 1) % 100 != end {
                    return Err(invalid());
                }
                Ok(TaxYear(start + 1))
            }
            None if label.len() == 4 => label.parse().map(TaxYear).map_err(|_| invalid()),
            None => Err(invalid()),
        }
    }

    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        // On or after 6 April belongs to the tax year ending next April
        if (date.month(), date.day()) >= (4, 6) {
            TaxYear(year + 1)
        } else {
            TaxYear(year)
        }
    }

    /// Start date of the tax year (6 April of previous year)
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0 - 1, 4, 6)
    }

    /// End date of the tax year (5 April)
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 4, 5)
    }

    /// Display as "2024/25" format
    pub fn display(&self) -> String {
        format!("{}/{:02}", self.0 - 1, self.0.rem_euclid(100))
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<TaxYear> for String {
    fn from(year: TaxYear) -> Self {
        year.display()
    }
}

impl TryFrom<String> for TaxYear {
    type Error = CalcError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        TaxYear::parse(&label)
    }
}

impl JsonSchema for TaxYear {
    fn schema_name() -> String {
        "TaxYear".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}

/// Rates and thresholds for one tax year.
///
/// Thresholds are cumulative taxable income after the personal allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxYearConfig {
    pub tax_year: TaxYear,
    pub dividend_allowance: Decimal,
    pub basic_rate_threshold: Decimal,
    pub higher_rate_threshold: Decimal,
    pub additional_rate_threshold: Decimal,
    pub basic_rate: Decimal,
    pub higher_rate: Decimal,
    pub additional_rate: Decimal,
    pub s455_rate: Decimal,
}

/// Rates table, oldest first.
pub const TAX_YEARS: &[TaxYearConfig] = &[
    TaxYearConfig {
        tax_year: TaxYear(2022),
        dividend_allowance: dec!(2000),
        basic_rate_threshold: dec!(37700),
        higher_rate_threshold: dec!(150000),
        additional_rate_threshold: dec!(150000),
        basic_rate: dec!(0.075),
        higher_rate: dec!(0.325),
        additional_rate: dec!(0.381),
        s455_rate: dec!(0.325),
    },
    // Health and social care levy: +1.25% on dividend rates, S455 follows the upper rate
    TaxYearConfig {
        tax_year: TaxYear(2023),
        dividend_allowance: dec!(2000),
        basic_rate_threshold: dec!(37700),
        higher_rate_threshold: dec!(150000),
        additional_rate_threshold: dec!(150000),
        basic_rate: dec!(0.0875),
        higher_rate: dec!(0.3375),
        additional_rate: dec!(0.3935),
        s455_rate: dec!(0.3375),
    },
    TaxYearConfig {
        tax_year: TaxYear(2024),
        dividend_allowance: dec!(1000),
        basic_rate_threshold: dec!(37700),
        higher_rate_threshold: dec!(125140),
        additional_rate_threshold: dec!(125140),
        basic_rate: dec!(0.0875),
        higher_rate: dec!(0.3375),
        additional_rate: dec!(0.3935),
        s455_rate: dec!(0.3375),
    },
    TaxYearConfig {
        tax_year: TaxYear(2025),
        dividend_allowance: dec!(500),
        basic_rate_threshold: dec!(37700),
        higher_rate_threshold: dec!(125140),
        additional_rate_threshold: dec!(125140),
        basic_rate: dec!(0.0875),
        higher_rate: dec!(0.3375),
        additional_rate: dec!(0.3935),
        s455_rate: dec!(0.3375),
    },
    TaxYearConfig {
        tax_year: TaxYear(2026),
        dividend_allowance: dec!(500),
        basic_rate_threshold: dec!(37700),
        higher_rate_threshold: dec!(125140),
        additional_rate_threshold: dec!(125140),
        basic_rate: dec!(0.0875),
        higher_rate: dec!(0.3375),
        additional_rate: dec!(0.3935),
        s455_rate: dec!(0.3375),
    },
];

/// Result of resolving a tax year label against the rates table.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub config: &'static TaxYearConfig,
    pub warning: Option<Warning>,
}

impl TaxYearConfig {
    /// Strict lookup, `None` when the year is not in the table.
    pub fn for_year(year: TaxYear) -> Option<&'static TaxYearConfig> {
        TAX_YEARS.iter().find(|c| c.tax_year == year)
    }

    pub fn default_year() -> &'static TaxYearConfig {
        Self::for_year(DEFAULT_TAX_YEAR).unwrap_or(&TAX_YEARS[0])
    }

    /// Resolve a label such as "2025/26". Unknown or malformed labels fall
    /// back to the default year and carry a warning; this never fails.
    pub fn lookup(label: &str) -> Lookup {
        match TaxYear::parse(label) {
            Ok(year) => Self::resolve(year),
            Err(_) => Self::fallback(label),
        }
    }

    /// Resolve an already parsed tax year, with the same fallback as [`lookup`](Self::lookup).
    pub fn resolve(year: TaxYear) -> Lookup {
        match Self::for_year(year) {
            Some(config) => Lookup {
                config,
                warning: None,
            },
            None => Self::fallback(&year.display()),
        }
    }

    fn fallback(requested: &str) -> Lookup {
        let config = Self::default_year();
        log::warn!(
            "Tax year '{}' not in rates table, falling back to {}",
            requested,
            config.tax_year
        );
        Lookup {
            config,
            warning: Some(Warning::UnknownTaxYear {
                requested: requested.to_string(),
                used: config.tax_year.display(),
            }),
        }
    }

    pub fn rate(&self, band: TaxBand) -> Decimal {
        match band {
            TaxBand::Basic => self.basic_rate,
            TaxBand::Higher => self.higher_rate,
            TaxBand::Additional => self.additional_rate,
        }
    }
}

/// All configured tax years in chronological order.
pub fn tax_years() -> impl Iterator<Item = &'static TaxYearConfig> {
    TAX_YEARS.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_year_from_date_before_april_6() {
        // 5 April 2024 is in 2023/24 tax year
        let date = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2024));
    }

    #[test]
    fn tax_year_from_date_on_april_6() {
        // 6 April 2024 is in 2024/25 tax year
        let date = NaiveDate::from_ymd_opt(2024, 4, 6).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2025));
    }

    #[test]
    fn tax_year_from_date_december() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(TaxYear::from_date(date), TaxYear(2026));
    }

    #[test]
    fn tax_year_display() {
        assert_eq!(TaxYear(2024).display(), "2023/24");
        assert_eq!(TaxYear(2026).display(), "2025/26");
        assert_eq!(TaxYear(2000).display(), "1999/00");
        assert_eq!(TaxYear(2001).to_string(), "2000/01");
    }

    #[test]
    fn tax_year_start_end_dates() {
        let ty = TaxYear(2026);
        assert_eq!(ty.start_date(), NaiveDate::from_ymd_opt(2025, 4, 6));
        assert_eq!(ty.end_date(), NaiveDate::from_ymd_opt(2026, 4, 5));
    }

    #[test]
    fn parse_labels() {
        assert_eq!(TaxYear::parse("2025/26").unwrap(), TaxYear(2026));
        assert_eq!(TaxYear::parse("1999/00").unwrap(), TaxYear(2000));
        assert_eq!(TaxYear::parse(" 2024/25 ").unwrap(), TaxYear(2025));
        assert_eq!(TaxYear::parse("2026").unwrap(), TaxYear(2026));
    }

    #[test]
    fn parse_rejects_malformed_labels() {
        for label in ["", "2025/27", "25/26", "2025-26", "abcd/ef", "2025/2026", "20256"] {
            assert_eq!(
                TaxYear::parse(label),
                Err(CalcError::InvalidTaxYear(label.to_string())),
                "{label}"
            );
        }
    }

    #[test]
    fn table_is_chronological_and_unique() {
        let years: Vec<_> = tax_years().map(|c| c.tax_year).collect();
        let mut sorted = years.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(years, sorted);
    }

    #[test]
    fn table_thresholds_non_decreasing_and_rates_fractional() {
        for c in tax_years() {
            assert!(c.basic_rate_threshold <= c.higher_rate_threshold, "{}", c.tax_year);
            assert!(c.higher_rate_threshold <= c.additional_rate_threshold, "{}", c.tax_year);
            for rate in [c.basic_rate, c.higher_rate, c.additional_rate, c.s455_rate] {
                assert!(rate >= Decimal::ZERO && rate < Decimal::ONE, "{}", c.tax_year);
            }
        }
    }

    #[test]
    fn default_year_is_in_table() {
        assert_eq!(TaxYearConfig::default_year().tax_year, TaxYear(2025));
    }

    #[test]
    fn lookup_known_year() {
        let lookup = TaxYearConfig::lookup("2025/26");
        assert_eq!(lookup.config.tax_year, TaxYear(2026));
        assert_eq!(lookup.config.dividend_allowance, dec!(500));
        assert!(lookup.warning.is_none());
    }

    #[test]
    fn lookup_unknown_year_falls_back_with_warning() {
        let lookup = TaxYearConfig::lookup("1999/00");
        assert_eq!(lookup.config.tax_year, DEFAULT_TAX_YEAR);
        assert_eq!(
            lookup.warning,
            Some(Warning::UnknownTaxYear {
                requested: "1999/00".to_string(),
                used: "2024/25".to_string(),
            })
        );
    }

    #[test]
    fn lookup_malformed_label_falls_back() {
        let lookup = TaxYearConfig::lookup("next year");
        assert_eq!(lookup.config.tax_year, DEFAULT_TAX_YEAR);
        assert!(lookup.warning.is_some());
    }

    #[test]
    fn dividend_allowances() {
        let allowance = |y| TaxYearConfig::for_year(TaxYear(y)).unwrap().dividend_allowance;
        assert_eq!(allowance(2023), dec!(2000));
        assert_eq!(allowance(2024), dec!(1000));
        assert_eq!(allowance(2025), dec!(500));
        assert_eq!(allowance(2026), dec!(500));
    }

    #[test]
    fn dividend_rates() {
        let ty = TaxYearConfig::for_year(TaxYear(2026)).unwrap();
        assert_eq!(ty.rate(TaxBand::Basic), dec!(0.0875));
        assert_eq!(ty.rate(TaxBand::Higher), dec!(0.3375));
        assert_eq!(ty.rate(TaxBand::Additional), dec!(0.3935));
    }

    #[test]
    fn band_labels() {
        assert_eq!(TaxBand::Basic.label(dec!(0.0875)), "Basic Rate (8.75%)");
        assert_eq!(TaxBand::Higher.label(dec!(0.3375)), "Higher Rate (33.75%)");
        assert_eq!(TaxBand::Basic.label(dec!(0.075)), "Basic Rate (7.5%)");
    }

    #[test]
    fn tax_year_serde_uses_label() {
        let json = serde_json::to_string(&TaxYear(2026)).unwrap();
        assert_eq!(json, "\"2025/26\"");
        let parsed: TaxYear = serde_json::from_str("\"2023/24\"").unwrap();
        assert_eq!(parsed, TaxYear(2024));
    }
}
