//! Error metrics for comparing predictions against targets

use crate::{MathError, Result};

/// Root mean squared error between predicted and actual values
pub fn rmse(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(MathError::InvalidInput(format!(
            "Predicted length ({}) doesn't match actual length ({})",
            predicted.len(),
            actual.len()
        )));
    }
    if predicted.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute RMS error of empty sequences".to_string(),
        ));
    }

    let mse = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum::<f64>()
        / predicted.len() as f64;

    Ok(mse.sqrt())
}
