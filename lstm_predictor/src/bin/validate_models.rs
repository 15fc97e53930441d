//! Run one validation iteration against a directory of archived model pools.

use clap::{Parser, ValueEnum};
use lstm_predictor::{DataLoader, JsonFileArchive, Validator, ValidatorConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Horizon {
    Seasonal,
    Trend,
}

#[derive(Debug, Parser)]
#[command(
    name = "validate_models",
    version,
    about = "Validate candidate models and archive the best"
)]
struct Cli {
    /// Directory holding `<iteration>seasonality.json` / `<iteration>trend.json`
    #[arg(long)]
    archive_dir: PathBuf,

    /// CSV file with `timestamp,value` rows
    #[arg(long)]
    data: PathBuf,

    /// Iteration to validate
    #[arg(long)]
    iteration: u32,

    #[arg(long, value_enum, default_value = "seasonal")]
    horizon: Horizon,

    /// Optional JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> lstm_predictor::Result<()> {
    let config = match &cli.config {
        Some(path) => ValidatorConfig::from_json_file(path)?,
        None => ValidatorConfig::default(),
    };

    let series = DataLoader::from_csv(&cli.data)?;
    info!(observations = series.len(), data = %cli.data.display(), "Loaded measurements");

    let mut validator = Validator::new(config, JsonFileArchive::new(&cli.archive_dir))?;
    let report = match cli.horizon {
        Horizon::Seasonal => validator.validate_seasonal(&series, cli.iteration)?,
        Horizon::Trend => validator.validate_trend(&series, cli.iteration)?,
    };

    info!(
        iteration = report.iteration,
        horizon = %report.horizon,
        merged = report.merged,
        groups = report.groups(),
        buckets = report.buckets(),
        excluded = report.excluded.len(),
        persisted = report.persisted,
        "Validation finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lstm_predictor=info,validate_models=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Validation failed");
            ExitCode::FAILURE
        }
    }
}
