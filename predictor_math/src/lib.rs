//! # Predictor Math
//!
//! Numeric primitives shared by the forecasting validator.
//! This crate provides the activation functions of the recurrent cell,
//! window statistics, min-max and z-score scaling, and the RMS error used
//! to rank candidate models.

use thiserror::Error;

pub mod activation;
pub mod error_metrics;
pub mod scaling;
pub mod statistics;

pub use activation::{sigmoid, tanh};
pub use error_metrics::rmse;
pub use scaling::{destandardize, min_max_scale, standardize, Standardized};
pub use statistics::{max, mean, min, sample_std_dev};

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
