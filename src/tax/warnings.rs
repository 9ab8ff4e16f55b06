use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal conditions noticed during a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Requested tax year is not in the rates table; `used` was applied instead.
    UnknownTaxYear { requested: String, used: String },
    /// A negative amount was supplied. Band allocation clamps it at zero.
    NegativeInput { field: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownTaxYear { requested, used } => {
                write!(f, "tax year '{requested}' not recognised, using {used} rates")
            }
            Warning::NegativeInput { field } => {
                write!(f, "{field} is negative, check the input")
            }
        }
    }
}
