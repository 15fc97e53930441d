//! Calendar bucketing of a fixed-cadence series

use crate::error::{ForecastError, Result};
use crate::resample::ResampledSeries;
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Calendar key of a bucket in the local clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    pub hour: u32,
    pub minute: u32,
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// All values of one time-of-day slot, concatenated across days
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: BucketKey,
    pub values: Vec<f64>,
}

/// Samples of a single hour of day, still timestamped
#[derive(Debug, Clone, PartialEq)]
pub struct HourGroup {
    pub hour: u32,
    pub samples: Vec<(DateTime<FixedOffset>, f64)>,
}

/// Groups samples by hour of day, then by minute within the hour
#[derive(Debug, Clone)]
pub struct Bucketizer {
    offset: FixedOffset,
}

impl Bucketizer {
    pub fn new(utc_offset_minutes: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(utc_offset_minutes * 60).ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "UTC offset of {} minutes is out of range",
                utc_offset_minutes
            ))
        })?;

        Ok(Self { offset })
    }

    /// Hour groups in ascending hour order
    pub fn by_hour(&self, series: &ResampledSeries) -> Vec<HourGroup> {
        let mut groups: BTreeMap<u32, Vec<(DateTime<FixedOffset>, f64)>> = BTreeMap::new();
        for (timestamp, value) in series.iter() {
            let local = self.local(timestamp);
            groups.entry(local.hour()).or_default().push((local, value));
        }

        groups
            .into_iter()
            .map(|(hour, samples)| HourGroup { hour, samples })
            .collect()
    }

    /// Minute buckets of one hour group in ascending minute order
    pub fn by_minute(&self, group: &HourGroup) -> Vec<Bucket> {
        let mut minutes: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for (timestamp, value) in &group.samples {
            minutes.entry(timestamp.minute()).or_default().push(*value);
        }

        minutes
            .into_iter()
            .map(|(minute, values)| Bucket {
                key: BucketKey {
                    hour: group.hour,
                    minute,
                },
                values,
            })
            .collect()
    }

    /// Flattened bucket list, hour-major then minute
    ///
    /// This order is the column order of every seasonal model pool.
    pub fn buckets(&self, series: &ResampledSeries) -> Vec<Bucket> {
        self.by_hour(series)
            .iter()
            .flat_map(|group| self.by_minute(group))
            .collect()
    }

    fn local(&self, timestamp: DateTime<Utc>) -> DateTime<FixedOffset> {
        timestamp.with_timezone(&self.offset)
    }
}
