pub mod dividend;
pub mod error;
pub mod s455;
pub mod uk;
pub mod vouchers;
pub mod warnings;

// Flat public surface for calculators and their inputs.
pub use dividend::{
    calculate_dividend_tax, calculate_dividend_tax_for, DividendTaxBand, DividendTaxResult,
};
pub use error::{amount_from_f64, check_amount, parse_amount, CalcError, MAX_AMOUNT};
pub use s455::{calculate_s455_tax, calculate_s455_tax_for, S455Result};
pub use uk::{
    tax_years, Lookup, TaxBand, TaxYear, TaxYearConfig, DEFAULT_TAX_YEAR, PERSONAL_ALLOWANCE,
    TAX_YEARS,
};
pub use vouchers::{
    summarise_vouchers, DividendVoucher, ShareholderYearSummary, VoucherInput, VoucherRecord,
};
pub use warnings::Warning;
