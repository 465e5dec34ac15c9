//! Simplified U.S. personal income tax estimator.
//!
//! Ordinary income is apportioned across progressive rate bands, and
//! long-term capital gains are stacked on top of ordinary taxable income
//! and taxed at the 0% / 15% / 20% tiers.

pub mod calculations;
pub mod models;

pub use calculations::{
    BracketResult, BracketRow, LtcgResult, Settlement, TaxEstimate, apportion, estimate, stack,
};
pub use models::*;
