//! Optional TOML settings file for the command-line tool.
//!
//! ```toml
//! filing_status = "MFJ"
//! brackets = "data/tax_brackets_2025.csv"
//! tables = "data/tables_2025.toml"
//! log_level = "info"
//! log_file = "tax-estimator.log"
//! ```
//!
//! Relative paths are resolved against the directory holding the settings
//! file. Command-line flags override every value here.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tax_core::{FilingStatus, TaxTables};
use tax_data::{BracketTableLoader, TablesFile};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub filing_status: Option<String>,
    pub brackets: Option<PathBuf>,
    pub tables: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid settings file")
    }

    /// Loads settings from `path`, resolving relative paths against its
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let mut settings = Self::parse(&contents)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;

        if let Some(base) = path.parent() {
            settings.brackets = settings.brackets.map(|p| base.join(p));
            settings.tables = settings.tables.map(|p| base.join(p));
            settings.log_file = settings.log_file.map(|p| base.join(p));
        }
        Ok(settings)
    }

    /// Overlays non-empty values from `overrides` onto `self`.
    pub fn merged(
        self,
        overrides: Settings,
    ) -> Self {
        Self {
            filing_status: overrides.filing_status.or(self.filing_status),
            brackets: overrides.brackets.or(self.brackets),
            tables: overrides.tables.or(self.tables),
            log_level: overrides.log_level.or(self.log_level),
            log_file: overrides.log_file.or(self.log_file),
        }
    }

    /// The configured default filing status, or Single.
    pub fn default_filing_status(&self) -> Result<FilingStatus> {
        match &self.filing_status {
            Some(code) => Ok(code.parse::<FilingStatus>()?),
            None => Ok(FilingStatus::Single),
        }
    }

    /// Builds the tax tables: the built-in 2025 data, with brackets and
    /// amounts replaced by any configured files.
    pub fn resolve_tables(&self) -> Result<TaxTables> {
        let mut tables = TaxTables::builtin().clone();

        if let Some(path) = &self.brackets {
            info!(path = %path.display(), "loading bracket tables");
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            tables = BracketTableLoader::load(file)
                .and_then(|loaded| loaded.apply_to(&tables))
                .with_context(|| format!("Failed to load brackets: {}", path.display()))?;
        }

        if let Some(path) = &self.tables {
            info!(path = %path.display(), "loading deduction and LTCG tables");
            tables = TablesFile::load(path)
                .and_then(|file| file.apply_to(&tables))
                .with_context(|| format!("Failed to load tables: {}", path.display()))?;
        }

        debug!(
            tax_year = tables.tax_year(),
            bracket_tables = tables.brackets().len(),
            "tax tables ready"
        );
        Ok(tables)
    }
}
