//! Min-max and z-score scaling

use crate::statistics::{mean, sample_std_dev};
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Values standardized to zero mean and unit variance, with the moments
/// needed to map a result back to the original scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardized {
    pub values: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
}

impl Standardized {
    /// True when the window had zero spread and every value was mapped to `0.0`
    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }
}

/// Standardize values with their own sample mean and standard deviation.
///
/// A zero standard deviation maps every value to `0.0` instead of dividing
/// by zero; [`destandardize`] then returns exactly the mean.
pub fn standardize(values: &[f64]) -> Result<Standardized> {
    let mean = mean(values)?;
    let std_dev = sample_std_dev(values)?;

    let values = if std_dev == 0.0 {
        vec![0.0; values.len()]
    } else {
        values.iter().map(|v| (v - mean) / std_dev).collect()
    };

    Ok(Standardized {
        values,
        mean,
        std_dev,
    })
}

/// Map a standardized value back to the original scale
pub fn destandardize(value: f64, mean: f64, std_dev: f64) -> f64 {
    value * std_dev + mean
}

/// Scale values from `[min, max]` into `[lower, upper]`.
///
/// When `min == max` every value lands on `lower`.
pub fn min_max_scale(
    values: &[f64],
    min: f64,
    max: f64,
    lower: f64,
    upper: f64,
) -> Result<Vec<f64>> {
    if lower >= upper {
        return Err(MathError::InvalidInput(format!(
            "Target range must be increasing, got [{}, {}]",
            lower, upper
        )));
    }
    if max < min {
        return Err(MathError::InvalidInput(format!(
            "Source range must be increasing, got [{}, {}]",
            min, max
        )));
    }

    let span = max - min;
    Ok(values
        .iter()
        .map(|v| {
            if span == 0.0 {
                lower
            } else {
                lower + (v - min) / span * (upper - lower)
            }
        })
        .collect())
}
