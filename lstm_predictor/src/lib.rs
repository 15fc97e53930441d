//! # LSTM Predictor
//!
//! Validation and selection of pre-trained recurrent forecasting models for
//! energy-management edge devices.
//!
//! ## Features
//!
//! - Gap-filling resampling of raw measurements onto a fixed cadence
//! - Time-of-day bucketing (hour, then minute within the hour)
//! - Stateless forward pass of the gated recurrent cell used by the models
//! - RMS-error scoring of every candidate group, in parallel
//! - Argmin selection with first-minimum-wins tie breaking
//! - Periodic merging of earlier winners into the candidate pool
//! - Keyed model archive (in memory or one JSON file per iteration)
//!
//! ## Horizons
//!
//! - **Seasonal**: one model per time-of-day bucket, selected bucket by bucket
//! - **Trend**: one global model
//!
//! ## Quick Start
//!
//! ```no_run
//! use lstm_predictor::{DataLoader, JsonFileArchive, Validator, ValidatorConfig};
//!
//! # fn main() -> lstm_predictor::Result<()> {
//! let series = DataLoader::from_csv("consumption.csv")?;
//! let archive = JsonFileArchive::new("models");
//! let mut validator = Validator::new(ValidatorConfig::default(), archive)?;
//!
//! let report = validator.validate_seasonal(&series, 14)?;
//! println!("persisted: {}", report.persisted);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod bucket;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod resample;
pub mod selection;
pub mod shuffle;
pub mod validator;
pub mod window;

// Re-export commonly used types
pub use crate::archive::{ArchiveKey, InMemoryArchive, JsonFileArchive, ModelArchive};
pub use crate::config::{SliceKind, ValidatorConfig};
pub use crate::data::{DataLoader, TimeSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::models::recurrent::{score, score_all};
pub use crate::models::{CandidateModel, HorizonKind, ModelPool, SeasonalPool, TrendPool};
pub use crate::selection::{arg_min_per_column, mode_of, CellId, ScoreMatrix, SelectionOutcome};
pub use crate::validator::{ValidationReport, Validator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
