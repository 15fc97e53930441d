//! Validator configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which slice of the windowed series a horizon is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceKind {
    Train,
    Validation,
}

/// Settings for one validator instance
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Number of lag values per feature window
    pub window_size: usize,
    /// Resampling cadence in minutes
    pub interval_minutes: u32,
    /// Offset of the local clock used for hour/minute bucketing
    pub utc_offset_minutes: i32,
    /// Share of windows assigned to the training slice
    pub train_ratio: f64,
    /// Lower bound of the min-max target range
    pub scale_min: f64,
    /// Upper bound of the min-max target range
    pub scale_max: f64,
    /// Seasonal history replaces the candidates on multiples of this
    pub seasonal_merge_interval: u32,
    /// Additional iterations that trigger a seasonal merge
    pub seasonal_extra_merge_iterations: Vec<u32>,
    /// Trend history is appended to the candidates on multiples of this
    pub trend_merge_interval: u32,
    pub seasonal_slice: SliceKind,
    pub trend_slice: SliceKind,
    /// Fixed seed for the pair shuffler; `None` draws from entropy
    pub shuffle_seed: Option<u64>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            window_size: 7,
            interval_minutes: 5,
            utc_offset_minutes: 0,
            train_ratio: 0.7,
            scale_min: 0.2,
            scale_max: 0.8,
            seasonal_merge_interval: 7,
            seasonal_extra_merge_iterations: vec![26],
            trend_merge_interval: 5,
            seasonal_slice: SliceKind::Train,
            trend_slice: SliceKind::Validation,
            shuffle_seed: None,
        }
    }
}

impl ValidatorConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_interval_minutes(mut self, interval_minutes: u32) -> Self {
        self.interval_minutes = interval_minutes;
        self
    }

    pub fn with_utc_offset_minutes(mut self, utc_offset_minutes: i32) -> Self {
        self.utc_offset_minutes = utc_offset_minutes;
        self
    }

    pub fn with_train_ratio(mut self, train_ratio: f64) -> Self {
        self.train_ratio = train_ratio;
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn with_seasonal_slice(mut self, slice: SliceKind) -> Self {
        self.seasonal_slice = slice;
        self
    }

    pub fn with_trend_slice(mut self, slice: SliceKind) -> Self {
        self.trend_slice = slice;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be at least 2".to_string(),
            ));
        }
        if self.interval_minutes == 0 || 60 % self.interval_minutes != 0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Interval of {} minutes does not divide an hour",
                self.interval_minutes
            )));
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ForecastError::InvalidParameter(format!(
                "UTC offset of {} minutes is out of range",
                self.utc_offset_minutes
            )));
        }
        if self.train_ratio <= 0.0 || self.train_ratio >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Train ratio must be between 0 and 1".to_string(),
            ));
        }
        if self.scale_min >= self.scale_max {
            return Err(ForecastError::InvalidParameter(format!(
                "Scale range [{}, {}] is empty",
                self.scale_min, self.scale_max
            )));
        }
        if self.seasonal_merge_interval == 0 || self.trend_merge_interval == 0 {
            return Err(ForecastError::InvalidParameter(
                "Merge intervals must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a seasonal run replaces its candidates with the selection history
    pub fn is_seasonal_merge(&self, iteration: u32) -> bool {
        iteration > 0
            && (iteration % self.seasonal_merge_interval == 0
                || self.seasonal_extra_merge_iterations.contains(&iteration))
    }

    /// Whether a trend run appends the selection history to its candidates
    pub fn is_trend_merge(&self, iteration: u32) -> bool {
        iteration > 0 && iteration % self.trend_merge_interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        assert!(ValidatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_merge_schedule() {
        let config = ValidatorConfig::default();
        assert!(!config.is_seasonal_merge(0));
        assert!(config.is_seasonal_merge(7));
        assert!(config.is_seasonal_merge(26));
        assert!(!config.is_seasonal_merge(27));
        assert!(!config.is_trend_merge(0));
        assert!(config.is_trend_merge(10));
        assert!(!config.is_trend_merge(11));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ValidatorConfig::default().with_window_size(1).validate().is_err());
        assert!(ValidatorConfig::default().with_interval_minutes(7).validate().is_err());
        assert!(ValidatorConfig::default().with_train_ratio(1.0).validate().is_err());
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"window_size": 5, "trend_slice": "train", "shuffle_seed": 9}}"#
        )
        .unwrap();

        let config = ValidatorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.window_size, 5);
        assert_eq!(config.trend_slice, SliceKind::Train);
        assert_eq!(config.shuffle_seed, Some(9));
        assert_eq!(config.interval_minutes, 5);
    }
}
