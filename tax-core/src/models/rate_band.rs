use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a band or table violates the bracket invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateBandError {
    #[error("bracket table has no bands")]
    Empty,

    #[error("first band must start at 0, got {0}")]
    FirstBandNotAtZero(Decimal),

    #[error("rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    #[error("band lower bound must be non-negative, got {0}")]
    NegativeLowerBound(Decimal),

    #[error("band upper bound {to} must be greater than lower bound {from}")]
    EmptyRange { from: Decimal, to: Decimal },

    #[error("band {index} ends at {end} but the next band starts at {next_start}")]
    NotContiguous {
        index: usize,
        end: Decimal,
        next_start: Decimal,
    },

    #[error("band {0} is unbounded but is not the last band")]
    UnboundedBeforeEnd(usize),

    #[error("last band must be unbounded, but it ends at {0}")]
    LastBandBounded(Decimal),
}

/// A contiguous income range taxed at a single marginal rate.
///
/// `to` is `None` for the unbounded top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    pub rate: Decimal,
    pub from: Decimal,
    pub to: Option<Decimal>,
}

impl RateBand {
    pub fn new(
        rate: Decimal,
        from: Decimal,
        to: Option<Decimal>,
    ) -> Result<Self, RateBandError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(RateBandError::InvalidRate(rate));
        }
        if from < Decimal::ZERO {
            return Err(RateBandError::NegativeLowerBound(from));
        }
        if let Some(to) = to {
            if to <= from {
                return Err(RateBandError::EmptyRange { from, to });
            }
        }
        Ok(Self { rate, from, to })
    }

    /// Caps `amount` at this band's upper bound. An unbounded band leaves
    /// the amount unchanged.
    pub fn cap(
        &self,
        amount: Decimal,
    ) -> Decimal {
        self.to.map_or(amount, |to| amount.min(to))
    }
}

/// An ordered sequence of rate bands covering `[0, ∞)`.
///
/// Construction checks that bands start at zero, are contiguous and
/// non-overlapping, and that only the last band is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RateBand>", into = "Vec<RateBand>")]
pub struct BracketTable {
    bands: Vec<RateBand>,
}

impl BracketTable {
    pub fn new(bands: Vec<RateBand>) -> Result<Self, RateBandError> {
        let first = bands.first().ok_or(RateBandError::Empty)?;
        if first.from != Decimal::ZERO {
            return Err(RateBandError::FirstBandNotAtZero(first.from));
        }

        for band in &bands {
            RateBand::new(band.rate, band.from, band.to)?;
        }

        for (index, pair) in bands.windows(2).enumerate() {
            let end = pair[0].to.ok_or(RateBandError::UnboundedBeforeEnd(index))?;
            if end != pair[1].from {
                return Err(RateBandError::NotContiguous {
                    index,
                    end,
                    next_start: pair[1].from,
                });
            }
        }

        if let Some(end) = bands.last().and_then(|b| b.to) {
            return Err(RateBandError::LastBandBounded(end));
        }

        Ok(Self { bands })
    }

    /// Builds a table from `(rate, upper bound)` pairs in ascending order;
    /// each band starts where the previous one ended.
    pub fn from_thresholds(bands: &[(Decimal, Option<Decimal>)]) -> Result<Self, RateBandError> {
        let mut from = Decimal::ZERO;
        let mut out = Vec::with_capacity(bands.len());
        for &(rate, to) in bands {
            out.push(RateBand { rate, from, to });
            if let Some(to) = to {
                from = to;
            }
        }
        Self::new(out)
    }

    pub fn bands(&self) -> &[RateBand] {
        &self.bands
    }
}

impl TryFrom<Vec<RateBand>> for BracketTable {
    type Error = RateBandError;

    fn try_from(bands: Vec<RateBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<BracketTable> for Vec<RateBand> {
    fn from(table: BracketTable) -> Self {
        table.bands
    }
}
