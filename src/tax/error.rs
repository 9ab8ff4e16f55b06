use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while turning raw input into calculator arguments.
///
/// The calculators themselves never fail; anything that reaches them is a
/// finite decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("invalid tax year '{0}', expected YYYY/YY (e.g. 2025/26)")]
    InvalidTaxYear(String),

    #[error("invalid date for {field}: '{value}', expected YYYY-MM-DD")]
    InvalidDate { field: String, value: String },
}

impl CalcError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Largest accepted amount either side of zero (£1 quadrillion). Keeps all
/// band and S455 arithmetic well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Reject amounts whose magnitude exceeds [`MAX_AMOUNT`].
pub fn check_amount(field: &str, value: Decimal) -> Result<Decimal, CalcError> {
    if value.abs() > MAX_AMOUNT {
        return Err(CalcError::invalid_input(
            field,
            format!("{value} exceeds the maximum of {MAX_AMOUNT}"),
        ));
    }
    Ok(value)
}

/// Convert a floating point amount, rejecting NaN and infinities.
pub fn amount_from_f64(field: &str, value: f64) -> Result<Decimal, CalcError> {
    if value.is_nan() {
        return Err(CalcError::invalid_input(field, "not a number"));
    }
    if value.is_infinite() {
        return Err(CalcError::invalid_input(field, "must be finite"));
    }
    let amount = Decimal::from_f64(value)
        .ok_or_else(|| CalcError::invalid_input(field, format!("{value} is out of range")))?;
    check_amount(field, amount)
}

/// Parse a GBP amount as typed by a user: accepts a leading `£` and
/// thousands separators, e.g. `£12,500.00`.
pub fn parse_amount(field: &str, input: &str) -> Result<Decimal, CalcError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid_input(field, "value is empty"));
    }
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let cleaned: String = rest
        .trim_start_matches('£')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    let value = Decimal::from_str(&cleaned)
        .map_err(|e| CalcError::invalid_input(field, format!("'{input}' is not an amount ({e})")))?;
    check_amount(field, if negative { -value } else { value })
}
