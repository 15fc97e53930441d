//! Error types for the lstm_predictor crate

use crate::models::HorizonKind;
use predictor_math::MathError;
use thiserror::Error;

/// Custom error types for the lstm_predictor crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Feature window and model vectors disagree in length
    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Persisted pool does not fit the live run
    #[error("Archive shape mismatch: {0}")]
    ArchiveShapeMismatch(String),

    /// Score matrix without rows or columns
    #[error("Score matrix is empty")]
    EmptyMatrix,

    /// Nothing could be scored, so nothing can be selected
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// No pool stored under the requested key
    #[error("No {horizon} pool archived for iteration {iteration}")]
    ArchiveNotFound { iteration: u32, horizon: HorizonKind },

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from numeric primitives
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON encoding or decoding
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
