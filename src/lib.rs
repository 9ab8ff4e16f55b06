//! UK dividend and director's loan (S455) tax calculations.
//!
//! ```
//! use dividify::tax::calculate_dividend_tax;
//! use rust_decimal_macros::dec;
//!
//! let result = calculate_dividend_tax(dec!(1000), dec!(0), "2025/26");
//! assert_eq!(result.total_tax, dec!(43.75));
//! assert_eq!(result.net_dividend, dec!(956.25));
//! ```

pub mod tax;
