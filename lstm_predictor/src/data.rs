//! Time series data handling for validation runs

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Ordered `(timestamp, value)` observations
///
/// Timestamps are strictly increasing. Gaps between timestamps are allowed,
/// and non-finite values mark missing measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

/// Data loader for time series data
#[derive(Debug)]
pub struct DataLoader;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: DateTime<Utc>,
    value: Option<f64>,
}

impl DataLoader {
    /// Load a series from a `timestamp,value` CSV file
    ///
    /// Timestamps are RFC 3339. An empty value cell is read as a missing
    /// measurement.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

        let mut timestamps = Vec::new();
        let mut values = Vec::new();
        for record in reader.deserialize() {
            let record: CsvRecord = record?;
            timestamps.push(record.timestamp);
            values.push(record.value.unwrap_or(f64::NAN));
        }

        TimeSeries::new(timestamps, values)
    }
}

impl TimeSeries {
    /// Create a new series, checking lengths and timestamp order
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Timestamps length ({}) doesn't match values length ({})",
                timestamps.len(),
                values.len()
            )));
        }

        if let Some(position) = timestamps.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(ForecastError::DataError(format!(
                "Timestamps must be strictly increasing (violated at index {})",
                position + 1
            )));
        }

        Ok(Self { timestamps, values })
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(timestamp, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }
}
