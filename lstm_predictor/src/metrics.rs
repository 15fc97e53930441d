//! Metrics for evaluating candidate models

use crate::error::{ForecastError, Result};
use crate::models::recurrent::score_all;
use crate::models::CandidateModel;
use predictor_math::rmse;

/// RMS error of a candidate over paired feature windows and targets
pub fn evaluate_candidate(
    features: &[Vec<f64>],
    targets: &[f64],
    model: &CandidateModel,
) -> Result<f64> {
    if features.is_empty() {
        return Err(ForecastError::EmptySelection(
            "No feature windows to evaluate".to_string(),
        ));
    }

    let predicted = score_all(features, model)?;
    let error = rmse(&predicted, targets)?;

    if !error.is_finite() {
        return Err(ForecastError::DataError(format!(
            "Candidate produced a non-finite error ({})",
            error
        )));
    }

    Ok(error)
}
