use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FilingStatus;

/// A non-fatal notice raised while preparing or running an estimate.
///
/// Advisories never stop a calculation; the caller decides how to surface
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advisory {
    /// A raw monetary entry was negative and was treated as zero.
    NegativeInputClamped { field: String, value: Decimal },

    /// A raw monetary entry exceeded [`MAX_AMOUNT`](crate::MAX_AMOUNT) and
    /// was capped at that ceiling.
    AmountCapped {
        field: String,
        value: Decimal,
        ceiling: Decimal,
    },

    /// Pre-tax deductions exceeded gross wages; adjusted wage income was
    /// floored at zero.
    WageIncomeClamped { unclamped: Decimal },

    /// No bracket table exists for the requested status, so another
    /// status's table was used instead.
    BracketFallback {
        requested: FilingStatus,
        used: FilingStatus,
    },
}

impl fmt::Display for Advisory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NegativeInputClamped { field, value } => {
                write!(f, "{field} was negative ({value}); treated as 0")
            }
            Self::AmountCapped {
                field,
                value,
                ceiling,
            } => write!(f, "{field} ({value}) exceeds {ceiling}; capped at {ceiling}"),
            Self::WageIncomeClamped { unclamped } => write!(
                f,
                "pre-tax deductions exceed gross wages by {}; adjusted wage income set to 0",
                -unclamped
            ),
            Self::BracketFallback { requested, used } => write!(
                f,
                "no bracket table for {requested}; using {used} brackets instead"
            ),
        }
    }
}
