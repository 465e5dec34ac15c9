//! Tax calculations: the ordinary bracket apportioner, the long-term capital
//! gains stacker, and the estimate that composes them.

pub mod brackets;
pub mod capital_gains;
pub mod common;
pub mod estimate;

pub use brackets::{BracketResult, BracketRow, apportion};
pub use capital_gains::{LtcgResult, stack};
pub use estimate::{Settlement, TaxEstimate, estimate};
