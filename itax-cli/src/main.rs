use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use itax_cli::report::{BatchEntry, ComparisonReport, OutputFormat, SideHustleReport};
use itax_cli::utils::parse_amount;
use itax_cli::{csv_loader, input, logging};
use itax_core::{SideHustleInput, TaxCalculator};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income-tax calculator for FY 2025-26 (AY 2026-27).
///
/// Compares the old and new regimes for salaried taxpayers and estimates the
/// tax cost of freelance income.
#[derive(Debug, Parser)]
#[command(name = "itax", version)]
struct Cli {
    /// Log filter, e.g. `debug` or `warn,itax_core=debug`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// TOML or JSON file overriding the built-in tax rules.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare both regimes for one taxpayer read from a .toml or .json file.
    Compare {
        #[arg(long)]
        input: PathBuf,
    },

    /// Compare both regimes for every row of a CSV file.
    Batch {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Estimate the extra tax on freelance receipts.
    SideHustle {
        /// Annual gross salary.
        #[arg(long, value_parser = parse_amount)]
        salary: Decimal,

        /// Annual freelance receipts.
        #[arg(long, value_parser = parse_amount)]
        freelance: Decimal,

        #[arg(long, default_value_t = 30)]
        age: u32,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn compare(
    calculator: &TaxCalculator,
    path: PathBuf,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let taxpayer = input::load_taxpayer(&path)
        .with_context(|| format!("failed to load taxpayer from '{}'", path.display()))?;
    let result = calculator.calculate(&taxpayer);

    match format {
        OutputFormat::Text => println!("{}", ComparisonReport::new(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn batch(
    calculator: &TaxCalculator,
    path: PathBuf,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let records = csv_loader::load_from_file(&path)
        .with_context(|| format!("failed to load taxpayers from '{}'", path.display()))?;
    info!(rows = records.len(), "Loaded batch");

    let results: Vec<_> = records
        .iter()
        .map(|record| calculator.calculate(&record.input))
        .collect();

    match format {
        OutputFormat::Text => {
            for (record, result) in records.iter().zip(&results) {
                let label = record
                    .label
                    .clone()
                    .unwrap_or_else(|| format!("Row {}", record.row));
                println!(
                    "{}\n",
                    ComparisonReport::new(result).with_label(Some(&label))
                );
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = records
                .iter()
                .zip(&results)
                .map(|(record, result)| BatchEntry {
                    row: record.row,
                    label: record.label.as_deref(),
                    result,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn side_hustle(
    calculator: &TaxCalculator,
    input: SideHustleInput,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let estimate = calculator.estimate_side_hustle(&input);

    match format {
        OutputFormat::Text => println!("{}", SideHustleReport(&estimate)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "Parsed arguments");

    let calculator = input::build_calculator(cli.rules.as_deref()).context("failed to load tax rules")?;

    match cli.command {
        Command::Compare { input } => compare(&calculator, input, cli.format),
        Command::Batch { csv } => batch(&calculator, csv, cli.format),
        Command::SideHustle {
            salary,
            freelance,
            age,
        } => side_hustle(
            &calculator,
            SideHustleInput {
                salary,
                freelance_receipts: freelance,
                age,
            },
            cli.format,
        ),
    }
}
