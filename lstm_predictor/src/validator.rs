//! Validation and selection of archived candidate models
//!
//! A run resamples recent measurements, scores every candidate group against
//! them, keeps the group with the lowest RMS error (per time-of-day bucket for
//! the seasonal horizon, globally for the trend horizon) and archives the
//! winners under the run's iteration.

use crate::archive::{ArchiveKey, ModelArchive};
use crate::bucket::Bucketizer;
use crate::config::{SliceKind, ValidatorConfig};
use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::metrics::evaluate_candidate;
use crate::models::{CandidateModel, HorizonKind, ModelPool, SeasonalPool, TrendPool};
use crate::resample::LinearResampler;
use crate::selection::{arg_min, arg_min_per_column, CellId, ScoreMatrix, SelectionOutcome};
use crate::shuffle::{rng_for, shuffle_pairs};
use crate::window::Windower;
use predictor_math::min_max_scale;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// A scoring cell that was left out of selection
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludedCell {
    pub cell: CellId,
    pub reason: String,
}

/// What a validation run did
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub iteration: u32,
    pub horizon: HorizonKind,
    /// Whether the candidate pool was combined with the selection history
    pub merged: bool,
    pub scores: ScoreMatrix,
    pub excluded: Vec<ExcludedCell>,
    pub selection: Option<SelectionOutcome>,
    /// Whether a selected pool was written to the archive
    pub persisted: bool,
}

impl ValidationReport {
    fn new(iteration: u32, horizon: HorizonKind, merged: bool, scores: ScoreMatrix) -> Self {
        Self {
            iteration,
            horizon,
            merged,
            scores,
            excluded: Vec::new(),
            selection: None,
            persisted: false,
        }
    }

    /// Number of candidate groups that competed
    pub fn groups(&self) -> usize {
        self.scores.groups()
    }

    /// Number of buckets scored (one for the trend horizon)
    pub fn buckets(&self) -> usize {
        self.scores.buckets()
    }
}

/// Runs validation for both horizons against one model archive
#[derive(Debug)]
pub struct Validator<A: ModelArchive> {
    config: ValidatorConfig,
    archive: A,
    resampler: LinearResampler,
    bucketizer: Bucketizer,
    windower: Windower,
}

impl<A: ModelArchive> Validator<A> {
    pub fn new(config: ValidatorConfig, archive: A) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            resampler: LinearResampler::new(config.interval_minutes)?,
            bucketizer: Bucketizer::new(config.utc_offset_minutes)?,
            windower: Windower::new(config.window_size, config.train_ratio)?,
            config,
            archive,
        })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn archive_mut(&mut self) -> &mut A {
        &mut self.archive
    }

    pub fn into_archive(self) -> A {
        self.archive
    }

    /// Validate the seasonal pool of `iteration` and archive the per-bucket winners
    ///
    /// # Errors
    ///
    /// Fails when the data cannot be resampled, when the archive cannot be
    /// read or written, or with [`ForecastError::ArchiveShapeMismatch`] when
    /// the pool's bucket count differs from the live buckets. Failures of
    /// individual cells are recorded in the report instead.
    pub fn validate_seasonal(
        &mut self,
        series: &TimeSeries,
        iteration: u32,
    ) -> Result<ValidationReport> {
        let resampled = self.resampler.resample(series)?;
        let (min, max) = (resampled.min(), resampled.max());

        let buckets = self.bucketizer.buckets(&resampled);
        let scaled: Vec<Vec<f64>> = buckets
            .iter()
            .map(|bucket| {
                min_max_scale(
                    &bucket.values,
                    min,
                    max,
                    self.config.scale_min,
                    self.config.scale_max,
                )
            })
            .collect::<predictor_math::Result<_>>()?;

        // At a merge point the history replaces the candidates, which then
        // need not exist at all.
        let merged = self.config.is_seasonal_merge(iteration);
        let pool = if merged {
            info!(
                iteration,
                "Combining models: seasonal history replaces the candidate pool"
            );
            self.seasonal_history(iteration)?
        } else {
            self.archive
                .get(&ArchiveKey::seasonal(iteration))?
                .into_seasonal()?
        };

        if pool.group_count() > 0 && pool.bucket_count() != buckets.len() {
            return Err(ForecastError::ArchiveShapeMismatch(format!(
                "Pool for iteration {} has {} buckets, data has {}",
                iteration,
                pool.bucket_count(),
                buckets.len()
            )));
        }

        let mut report = ValidationReport::new(
            iteration,
            HorizonKind::Seasonal,
            merged,
            ScoreMatrix::new(pool.group_count(), buckets.len()),
        );
        if pool.group_count() == 0 || buckets.is_empty() {
            warn!(
                iteration,
                groups = pool.group_count(),
                buckets = buckets.len(),
                "Nothing to validate, skipping persistence"
            );
            return Ok(report);
        }

        let bucket_count = buckets.len();
        let windower = &self.windower;
        let slice = self.config.seasonal_slice;
        let seed = self.config.shuffle_seed;
        let groups = pool.groups();
        let results: Vec<(CellId, Result<f64>)> = (0..pool.group_count() * bucket_count)
            .into_par_iter()
            .map(|index| {
                let cell = CellId::new(index / bucket_count, index % bucket_count);
                let model = &groups[cell.group][cell.bucket];
                let result = score_cell(
                    windower,
                    slice,
                    &scaled[cell.bucket],
                    model,
                    seed,
                    index as u64,
                );
                (cell, result)
            })
            .collect();

        record_scores(&mut report, results, |cell| buckets[cell.bucket].key.to_string())?;

        let winners = arg_min_per_column(&report.scores)?;
        if winners.is_empty() {
            warn!(iteration, "Every seasonal cell was excluded, skipping persistence");
            return Ok(report);
        }
        let outcome = SelectionOutcome::new(winners);
        info!(
            iteration,
            selected_buckets = outcome.winners().len(),
            buckets = bucket_count,
            dominant_group = ?outcome.dominant_group(),
            "Seasonal selection complete"
        );

        let mut best = Vec::with_capacity(bucket_count);
        for (k, bucket) in buckets.iter().enumerate() {
            let group = outcome.winner_for(k).unwrap_or_else(|| {
                warn!(iteration, bucket = %bucket.key, "No scored candidate, keeping group 0");
                0
            });
            let model = pool.model(group, k).ok_or_else(|| {
                ForecastError::ArchiveShapeMismatch(format!(
                    "No model for group {} bucket {}",
                    group, k
                ))
            })?;
            best.push(model.clone());
        }

        let selected = SeasonalPool::new(vec![best])?;
        self.archive
            .put(&ArchiveKey::seasonal(iteration), &ModelPool::Seasonal(selected))?;

        report.selection = Some(outcome);
        report.persisted = true;
        Ok(report)
    }

    /// Validate the trend pool of `iteration` and archive the single winner
    ///
    /// # Errors
    ///
    /// Fails when the data cannot be resampled or the archive cannot be read
    /// or written. Candidates that cannot be scored are recorded in the report.
    pub fn validate_trend(
        &mut self,
        series: &TimeSeries,
        iteration: u32,
    ) -> Result<ValidationReport> {
        let resampled = self.resampler.resample(series)?;
        let scaled = min_max_scale(
            resampled.values(),
            resampled.min(),
            resampled.max(),
            self.config.scale_min,
            self.config.scale_max,
        )?;

        let mut pool = self
            .archive
            .get(&ArchiveKey::trend(iteration))?
            .into_trend()?;
        let merged = self.config.is_trend_merge(iteration);
        if merged {
            let history = self.trend_history(iteration)?;
            info!(
                iteration,
                candidates = pool.len(),
                history = history.len(),
                "Combining models: trend history appended to the candidate pool"
            );
            pool.extend(history);
        }

        let mut report = ValidationReport::new(
            iteration,
            HorizonKind::Trend,
            merged,
            ScoreMatrix::new(pool.len(), 1),
        );
        if pool.is_empty() {
            warn!(iteration, "Trend pool is empty, skipping persistence");
            return Ok(report);
        }

        let windower = &self.windower;
        let slice = self.config.trend_slice;
        let seed = self.config.shuffle_seed;
        let results: Vec<(CellId, Result<f64>)> = pool
            .models()
            .par_iter()
            .enumerate()
            .map(|(group, model)| {
                let result = score_cell(windower, slice, &scaled, model, seed, group as u64);
                (CellId::new(group, 0), result)
            })
            .collect();

        record_scores(&mut report, results, |_| "global".to_string())?;

        let Some(winner) = arg_min(&report.scores.column(0)) else {
            warn!(iteration, "No trend candidate could be scored, skipping persistence");
            return Ok(report);
        };
        let model = pool.get(winner).cloned().ok_or_else(|| {
            ForecastError::ArchiveShapeMismatch(format!("No trend model for group {}", winner))
        })?;

        info!(
            iteration,
            group = winner,
            rmse = ?report.scores.get(CellId::new(winner, 0)),
            "Trend selection complete"
        );

        self.archive.put(
            &ArchiveKey::trend(iteration),
            &ModelPool::Trend(TrendPool::new(vec![model])),
        )?;

        report.selection = Some(SelectionOutcome::new(vec![CellId::new(winner, 0)]));
        report.persisted = true;
        Ok(report)
    }

    /// First group of every earlier seasonal pool, in iteration order
    fn seasonal_history(&self, iteration: u32) -> Result<SeasonalPool> {
        let mut rows = Vec::new();
        for previous in 0..iteration {
            match self.archive.get(&ArchiveKey::seasonal(previous)) {
                Ok(pool) => match pool.into_seasonal()?.group(0) {
                    Some(row) => rows.push(row.to_vec()),
                    None => warn!(iteration = previous, "Archived seasonal pool is empty"),
                },
                Err(ForecastError::ArchiveNotFound { .. }) => {
                    warn!(iteration = previous, "No archived seasonal pool, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        SeasonalPool::new(rows)
    }

    /// First model of every earlier trend pool, in iteration order
    fn trend_history(&self, iteration: u32) -> Result<Vec<CandidateModel>> {
        let mut models = Vec::new();
        for previous in 0..iteration {
            match self.archive.get(&ArchiveKey::trend(previous)) {
                Ok(pool) => match pool.into_trend()?.get(0) {
                    Some(model) => models.push(model.clone()),
                    None => warn!(iteration = previous, "Archived trend pool is empty"),
                },
                Err(ForecastError::ArchiveNotFound { .. }) => {
                    warn!(iteration = previous, "No archived trend pool, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(models)
    }
}

/// Window, shuffle and score one candidate on one value series
fn score_cell(
    windower: &Windower,
    slice: SliceKind,
    values: &[f64],
    model: &CandidateModel,
    seed: Option<u64>,
    stream: u64,
) -> Result<f64> {
    let (lower, upper) = windower.split(values.len()).slice(slice);
    let features = windower.features(values, lower, upper)?;
    let targets = windower.targets(values, lower, upper)?;
    let (features, targets) = shuffle_pairs(features, targets, &mut rng_for(seed, stream))?;

    evaluate_candidate(&features, &targets, model)
}

/// Fold per-cell results into the report, logging every exclusion
fn record_scores<F>(
    report: &mut ValidationReport,
    results: Vec<(CellId, Result<f64>)>,
    label: F,
) -> Result<()>
where
    F: Fn(CellId) -> String,
{
    for (cell, result) in results {
        match result {
            Ok(rmse) => {
                debug!(group = cell.group, bucket = %label(cell), rmse, "Candidate scored");
                report.scores.set(cell, Some(rmse))?;
            }
            Err(e) => {
                warn!(group = cell.group, bucket = %label(cell), error = %e, "Candidate excluded");
                report.excluded.push(ExcludedCell {
                    cell,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(())
}
