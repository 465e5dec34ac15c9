//! Command-line front end for the tax estimator.

pub mod cli;
pub mod logging;
pub mod report;
pub mod settings;
