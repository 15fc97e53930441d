//! Descriptive statistics over value windows

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean of the values
///
/// Uses the running-mean update, so a window of identical values yields
/// that value bit for bit.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty slice".to_string(),
        ));
    }

    Ok(values.iter().mean())
}

/// Sample standard deviation (n - 1 denominator)
///
/// Computed in two passes around the mean. A single value or a constant
/// window gives exactly `0.0`.
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    let center = mean(values)?;
    if values.len() < 2 {
        return Ok(0.0);
    }

    let sum_sq: f64 = values.iter().map(|v| (v - center).powi(2)).sum();
    Ok((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Smallest finite value
pub fn min(values: &[f64]) -> Result<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))))
        .ok_or_else(|| {
            MathError::InsufficientData("No finite values to take the minimum of".to_string())
        })
}

/// Largest finite value
pub fn max(values: &[f64]) -> Result<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .ok_or_else(|| {
            MathError::InsufficientData("No finite values to take the maximum of".to_string())
        })
}
