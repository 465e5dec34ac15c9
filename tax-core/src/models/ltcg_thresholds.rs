use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income levels at which long-term capital gains move from the 0% rate to
/// 15%, and from 15% to 20%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LtcgThresholds {
    #[serde(alias = "zero_rate_ceiling")]
    pub zero_rate_ceiling: Decimal,
    #[serde(alias = "fifteen_rate_ceiling")]
    pub fifteen_rate_ceiling: Decimal,
}

impl LtcgThresholds {
    pub fn new(
        zero_rate_ceiling: Decimal,
        fifteen_rate_ceiling: Decimal,
    ) -> Self {
        Self {
            zero_rate_ceiling,
            fifteen_rate_ceiling,
        }
    }
}
