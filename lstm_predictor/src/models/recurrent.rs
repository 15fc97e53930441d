//! Stateless forward pass of the recurrent cell
//!
//! The cell has input, output and update gates but no forget gate: the cell
//! state only accumulates across lags. Archived parameter sets were trained
//! against exactly this recurrence, so it must not be swapped for a textbook
//! LSTM or GRU.

use super::CandidateModel;
use crate::error::{ForecastError, Result};
use predictor_math::{destandardize, sigmoid, standardize, tanh};
use tracing::debug;

/// Forecast the value following `window` with one candidate model
///
/// The window is standardized with its own mean and sample standard
/// deviation, run through the cell lag by lag starting from a zero state, and
/// the final output is mapped back with the same moments. A constant window
/// standardizes to all zeros and therefore forecasts exactly its mean.
pub fn score(window: &[f64], model: &CandidateModel) -> Result<f64> {
    if window.len() != model.window_size() {
        return Err(ForecastError::DimensionMismatch {
            expected: model.window_size(),
            actual: window.len(),
        });
    }

    let standardized = standardize(window)?;
    if standardized.is_degenerate() {
        debug!(mean = standardized.mean, "Constant feature window");
    }

    let mut ct = 0.0;
    let mut yt = 0.0;
    for (i, x) in standardized.values.iter().enumerate() {
        let it = sigmoid(model.wi()[i] * x + model.r_i()[i] * yt);
        let ot = sigmoid(model.wo()[i] * x + model.r_o()[i] * yt);
        let zt = tanh(model.wz()[i] * x + model.r_z()[i] * yt);
        ct += it * zt;
        yt = ot * tanh(ct);
    }

    Ok(destandardize(yt, standardized.mean, standardized.std_dev))
}

/// Score every window in order
pub fn score_all(windows: &[Vec<f64>], model: &CandidateModel) -> Result<Vec<f64>> {
    windows.iter().map(|window| score(window, model)).collect()
}
