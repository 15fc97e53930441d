//! Resampling of irregular series onto a fixed cadence

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::debug;

/// Gap-free series with a fixed cadence
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSeries {
    start: DateTime<Utc>,
    interval: Duration,
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl ResampledSeries {
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn interval(&self) -> Duration {
        self.interval
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

    /// Smallest resampled value
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest resampled value
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Timestamp of the sample at `index`
    pub fn timestamp_at(&self, index: usize) -> DateTime<Utc> {
        self.start + self.interval * index as i32
    }

    /// Iterate over `(timestamp, value)` samples
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (self.timestamp_at(i), *v))
    }
}

/// Linear interpolation onto a grid aligned to multiples of the interval
///
/// Missing values and missing timestamps inside the observed range are
/// interpolated between their finite neighbours. Grid points before the first
/// or after the last finite observation take that observation's value.
#[derive(Debug, Clone)]
pub struct LinearResampler {
    interval: Duration,
}

impl LinearResampler {
    pub fn new(interval_minutes: u32) -> Result<Self> {
        if interval_minutes == 0 {
            return Err(ForecastError::InvalidParameter(
                "Resampling interval must be positive".to_string(),
            ));
        }

        Ok(Self {
            interval: Duration::minutes(i64::from(interval_minutes)),
        })
    }

    pub fn resample(&self, series: &TimeSeries) -> Result<ResampledSeries> {
        let observed: Vec<(i64, f64)> = series
            .iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| (t.timestamp(), v))
            .collect();

        if observed.is_empty() {
            return Err(ForecastError::DataError(
                "No finite values to resample".to_string(),
            ));
        }

        let step = self.interval.num_seconds();
        let first = series.timestamps()[0].timestamp();
        let last = series.timestamps()[series.len() - 1].timestamp();
        let grid_start = first.div_euclid(step) * step;
        let grid_end = last.div_euclid(step) * step;
        let count = ((grid_end - grid_start) / step + 1) as usize;

        let mut values = Vec::with_capacity(count);
        let mut cursor = 0;
        for i in 0..count {
            let t = grid_start + i as i64 * step;
            while cursor + 1 < observed.len() && observed[cursor + 1].0 <= t {
                cursor += 1;
            }
            values.push(interpolate(&observed, cursor, t));
        }

        let min = predictor_math::min(&values)?;
        let max = predictor_math::max(&values)?;
        let start = Utc
            .timestamp_opt(grid_start, 0)
            .single()
            .ok_or_else(|| ForecastError::DataError(format!("Invalid grid start {}", grid_start)))?;

        debug!(
            observations = series.len(),
            finite = observed.len(),
            samples = values.len(),
            "Resampled series"
        );

        Ok(ResampledSeries {
            start,
            interval: self.interval,
            values,
            min,
            max,
        })
    }
}

/// Value at `t`, where `observed[cursor]` is the last observation not after
/// `t` (or the first observation when `t` precedes all of them)
fn interpolate(observed: &[(i64, f64)], cursor: usize, t: i64) -> f64 {
    let (t0, v0) = observed[cursor];
    if t <= t0 || cursor + 1 == observed.len() {
        return v0;
    }

    let (t1, v1) = observed[cursor + 1];
    v0 + (v1 - v0) * (t - t0) as f64 / (t1 - t0) as f64
}
