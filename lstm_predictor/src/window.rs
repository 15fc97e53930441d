//! Lag-feature windows, next-step targets and the train/validation split

use crate::config::SliceKind;
use crate::error::{ForecastError, Result};

/// Window index bounds of the training and validation slices
///
/// Bounds are half-open ranges over window start positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBounds {
    pub train_lower: usize,
    pub train_upper: usize,
    pub val_lower: usize,
    pub val_upper: usize,
}

impl SplitBounds {
    /// Bounds of the requested slice
    pub fn slice(&self, kind: SliceKind) -> (usize, usize) {
        match kind {
            SliceKind::Train => (self.train_lower, self.train_upper),
            SliceKind::Validation => (self.val_lower, self.val_upper),
        }
    }
}

/// Sliding windows of `window_size` lags, each followed by one target value
#[derive(Debug, Clone)]
pub struct Windower {
    window_size: usize,
    train_ratio: f64,
}

impl Windower {
    pub fn new(window_size: usize, train_ratio: f64) -> Result<Self> {
        if window_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }
        if train_ratio <= 0.0 || train_ratio >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Train ratio must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            window_size,
            train_ratio,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of complete (window, target) pairs in a series of `len` values
    pub fn window_count(&self, len: usize) -> usize {
        len.saturating_sub(self.window_size)
    }

    /// Split the windows of a series of `len` values into train and validation
    pub fn split(&self, len: usize) -> SplitBounds {
        let count = self.window_count(len);
        let train_upper = (count as f64 * self.train_ratio).floor() as usize;

        SplitBounds {
            train_lower: 0,
            train_upper,
            val_lower: train_upper,
            val_upper: count,
        }
    }

    /// Feature windows starting at positions `lower..upper`
    pub fn features(&self, series: &[f64], lower: usize, upper: usize) -> Result<Vec<Vec<f64>>> {
        self.check_bounds(series, lower, upper)?;
        Ok((lower..upper)
            .map(|i| series[i..i + self.window_size].to_vec())
            .collect())
    }

    /// Targets following the windows starting at positions `lower..upper`
    pub fn targets(&self, series: &[f64], lower: usize, upper: usize) -> Result<Vec<f64>> {
        self.check_bounds(series, lower, upper)?;
        Ok((lower..upper).map(|i| series[i + self.window_size]).collect())
    }

    fn check_bounds(&self, series: &[f64], lower: usize, upper: usize) -> Result<()> {
        let count = self.window_count(series.len());
        if lower > upper || upper > count {
            return Err(ForecastError::DataError(format!(
                "Window range {}..{} is outside the {} available windows",
                lower, upper, count
            )));
        }
        Ok(())
    }
}
