mod advisory;
mod filing_status;
mod ltcg_thresholds;
mod rate_band;
mod tax_inputs;
mod tax_tables;

pub use advisory::Advisory;
pub use filing_status::{FilingStatus, FilingStatusParseError};
pub use ltcg_thresholds::LtcgThresholds;
pub use rate_band::{BracketTable, RateBand, RateBandError};
pub use tax_inputs::{MAX_AMOUNT, TaxInputs};
pub use tax_tables::{BracketSelection, PerStatus, TaxTables, TaxTablesError};
