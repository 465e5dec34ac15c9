use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::{FilingStatus, TaxEstimate, TaxInputs, estimate};
use tax_data::{load_inputs_from_file, parse_decimal};
use tracing::info;

use crate::report::{render_estimate, render_tables};
use crate::settings::Settings;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Simplified U.S. federal income tax estimator.
///
/// Apportions ordinary income across the filing status brackets, stacks
/// long-term capital gains on top, and compares the total to withholding.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version, about, long_about = None)]
pub struct Cli {
    /// Settings file (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bracket CSV replacing the built-in brackets.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// TOML file replacing the built-in deductions and LTCG thresholds.
    #[arg(long, global = true)]
    pub tables: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=trace`. `RUST_LOG` wins.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Print JSON instead of a text report.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate tax for one set of inputs.
    Estimate(EstimateArgs),

    /// Estimate every row of an inputs CSV.
    Batch {
        /// Inputs CSV with a `filing_status,gross_wages,...` header.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the active tax tables.
    Tables {
        /// Only this filing status (S, MFJ, MFS, HOH).
        #[arg(long)]
        status: Option<FilingStatus>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    /// Filing status (S, MFJ, MFS, HOH). Defaults to the settings file, then S.
    #[arg(long)]
    pub status: Option<FilingStatus>,

    /// Gross wages.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub gross: Decimal,

    /// Pre-tax retirement contributions (401k and similar).
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub retirement: Decimal,

    /// Other pre-tax payroll deductions.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub other_deductions: Decimal,

    /// Net short-term capital gains.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub short_term_gains: Decimal,

    /// Net long-term capital gains.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub long_term_gains: Decimal,

    /// Federal tax already withheld.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    pub withheld: Decimal,

    /// Standard deduction override. Defaults to the table value.
    #[arg(long, value_parser = parse_decimal)]
    pub deduction: Option<Decimal>,
}

impl EstimateArgs {
    pub fn to_inputs(
        &self,
        default_status: FilingStatus,
    ) -> TaxInputs {
        TaxInputs {
            filing_status: self.status.unwrap_or(default_status),
            gross_wages: self.gross,
            pretax_retirement: self.retirement,
            other_pretax_deductions: self.other_deductions,
            short_term_gains: self.short_term_gains,
            long_term_gains: self.long_term_gains,
            withheld: self.withheld,
            standard_deduction: self.deduction,
        }
    }
}

impl Cli {
    /// Settings from `--config` (if any) with command-line flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(file.merged(Settings {
            filing_status: None,
            brackets: self.brackets.clone(),
            tables: self.tables.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }))
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

/// Runs `command` and returns what should be printed to stdout.
pub fn execute(
    command: &Command,
    settings: &Settings,
    json: bool,
) -> Result<String> {
    let tables = settings.resolve_tables()?;

    match command {
        Command::Estimate(args) => {
            let inputs = args.to_inputs(settings.default_filing_status()?);
            let result = estimate(&inputs, &tables);
            if json {
                Ok(serde_json::to_string_pretty(&result)?)
            } else {
                Ok(render_estimate(&result))
            }
        }
        Command::Batch { file } => {
            let rows = load_inputs_from_file(file)
                .with_context(|| format!("Failed to load inputs: {}", file.display()))?;
            info!(rows = rows.len(), path = %file.display(), "estimating batch");
            let results: Vec<TaxEstimate> = rows
                .iter()
                .map(|inputs| estimate(inputs, &tables))
                .collect();
            if json {
                Ok(serde_json::to_string_pretty(&results)?)
            } else {
                Ok(render_batch(&results))
            }
        }
        Command::Tables { status } => {
            if json {
                Ok(serde_json::to_string_pretty(&tables)?)
            } else {
                let statuses = match status {
                    Some(status) => vec![*status],
                    None => FilingStatus::all().to_vec(),
                };
                Ok(render_tables(&tables, &statuses))
            }
        }
    }
}

fn render_batch(results: &[TaxEstimate]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format!("== Row {} ==\n{}", i + 1, render_estimate(result)))
        .collect::<Vec<_>>()
        .join("\n")
}
