use chrono::{Duration, TimeZone, Utc};
use lstm_predictor::selection::arg_min;
use lstm_predictor::{
    ArchiveKey, CandidateModel, ForecastError, InMemoryArchive, JsonFileArchive, ModelArchive,
    ModelPool, SeasonalPool, SliceKind, TimeSeries, TrendPool, Validator, ValidatorConfig,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Hourly household-like load: daily cycle, slow drift and some jitter
fn hourly_series(hours: i64) -> TimeSeries {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let timestamps = (0..hours).map(|i| start + Duration::hours(i)).collect();
    let values = (0..hours)
        .map(|i| {
            let hour = (i % 24) as f64;
            let day = (i / 24) as f64;
            800.0
                + 300.0 * (hour / 24.0 * std::f64::consts::TAU).sin()
                + 4.0 * day
                + 15.0 * (i as f64 * 1.3).sin()
        })
        .collect();
    TimeSeries::new(timestamps, values).unwrap()
}

fn hourly_config() -> ValidatorConfig {
    ValidatorConfig::default()
        .with_interval_minutes(60)
        .with_shuffle_seed(17)
}

fn candidate(window_size: usize, phase: f64) -> CandidateModel {
    let weights = |scale: f64| -> Vec<f64> {
        (0..window_size)
            .map(|i| scale * ((i as f64 + phase) * 0.9).sin())
            .collect()
    };
    CandidateModel::new(
        weights(1.2),
        weights(0.7),
        weights(-0.9),
        weights(0.4),
        weights(-0.3),
        weights(0.6),
        vec![0.0; window_size],
        vec![0.0; window_size],
    )
    .unwrap()
}

fn seasonal_pool(groups: usize, buckets: usize, window_size: usize) -> SeasonalPool {
    SeasonalPool::new(
        (0..groups)
            .map(|g| {
                (0..buckets)
                    .map(|k| candidate(window_size, g as f64 * 1.7 + k as f64 * 0.1))
                    .collect()
            })
            .collect(),
    )
    .unwrap()
}

fn stored_seasonal(archive: &impl ModelArchive, iteration: u32) -> SeasonalPool {
    archive
        .get(&ArchiveKey::seasonal(iteration))
        .unwrap()
        .into_seasonal()
        .unwrap()
}

#[test]
fn test_seasonal_run_archives_one_model_per_bucket() {
    let pool = seasonal_pool(3, 24, 7);
    let mut archive = InMemoryArchive::new();
    archive
        .put(&ArchiveKey::seasonal(3), &ModelPool::Seasonal(pool.clone()))
        .unwrap();

    let mut validator = Validator::new(hourly_config(), archive).unwrap();
    let report = validator.validate_seasonal(&hourly_series(14 * 24), 3).unwrap();

    assert!(report.persisted);
    assert!(!report.merged);
    assert_eq!(report.groups(), 3);
    assert_eq!(report.buckets(), 24);
    assert!(report.excluded.is_empty());

    let selection = report.selection.clone().unwrap();
    assert_eq!(selection.winners().len(), 24);

    let stored = stored_seasonal(validator.archive(), 3);
    assert_eq!(stored.group_count(), 1);
    assert_eq!(stored.bucket_count(), 24);
    for k in 0..24 {
        let winner = selection.winner_for(k).unwrap();
        assert_eq!(Some(winner), arg_min(&report.scores.column(k)));
        assert_eq!(stored.model(0, k), pool.model(winner, k));
    }
}

#[test]
fn test_seasonal_shape_mismatch_aborts_without_writing() {
    let pool = seasonal_pool(2, 5, 7);
    let mut archive = InMemoryArchive::new();
    archive
        .put(&ArchiveKey::seasonal(1), &ModelPool::Seasonal(pool.clone()))
        .unwrap();

    let mut validator = Validator::new(hourly_config(), archive).unwrap();
    let result = validator.validate_seasonal(&hourly_series(14 * 24), 1);

    assert!(matches!(result, Err(ForecastError::ArchiveShapeMismatch(_))));
    assert_eq!(stored_seasonal(validator.archive(), 1), pool);
}

#[test]
fn test_mismatched_group_is_excluded_not_fatal() {
    let good = seasonal_pool(2, 24, 7).into_groups();
    let short = seasonal_pool(1, 24, 5).into_groups();
    let pool = SeasonalPool::new(vec![good[0].clone(), short[0].clone(), good[1].clone()]).unwrap();

    let mut archive = InMemoryArchive::new();
    archive
        .put(&ArchiveKey::seasonal(2), &ModelPool::Seasonal(pool))
        .unwrap();

    let mut validator = Validator::new(hourly_config(), archive).unwrap();
    let report = validator.validate_seasonal(&hourly_series(14 * 24), 2).unwrap();

    assert!(report.persisted);
    assert_eq!(report.excluded.len(), 24);
    assert!(report.excluded.iter().all(|excluded| excluded.cell.group == 1));
    assert!(report.excluded[0].reason.contains("Dimension mismatch"));

    let selection = report.selection.unwrap();
    assert!(selection.winners().iter().all(|cell| cell.group != 1));
    assert_eq!(selection.winners().len(), 24);
}

#[test]
fn test_bucket_without_windows_is_excluded_and_others_persist() {
    // Seven full days plus the first 13 hours of an eighth: hours 0-12 hold
    // 8 values (one window), hours 13-23 hold 7 values (no window)
    let config = hourly_config()
        .with_train_ratio(0.5)
        .with_seasonal_slice(SliceKind::Validation);
    let pool = seasonal_pool(2, 24, 7);
    let mut archive = InMemoryArchive::new();
    archive
        .put(&ArchiveKey::seasonal(4), &ModelPool::Seasonal(pool.clone()))
        .unwrap();

    let mut validator = Validator::new(config, archive).unwrap();
    let report = validator.validate_seasonal(&hourly_series(7 * 24 + 13), 4).unwrap();

    assert!(report.persisted);
    assert_eq!(report.excluded.len(), 2 * 11);
    assert!(report.excluded.iter().all(|excluded| excluded.cell.bucket >= 13));
    assert_eq!(report.scores.missing(), 2 * 11);

    let selection = report.selection.unwrap();
    assert_eq!(selection.winners().len(), 13);

    let stored = stored_seasonal(validator.archive(), 4);
    assert_eq!(stored.bucket_count(), 24);
    for k in 13..24 {
        assert_eq!(stored.model(0, k), pool.model(0, k));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut archive = InMemoryArchive::new();
    archive
        .put(&ArchiveKey::seasonal(1), &ModelPool::Seasonal(seasonal_pool(2, 24, 7)))
        .unwrap();
    let series = hourly_series(14 * 24);

    let first = Validator::new(hourly_config(), archive.clone())
        .unwrap()
        .validate_seasonal(&series, 1)
        .unwrap();
    let second = Validator::new(hourly_config(), archive)
        .unwrap()
        .validate_seasonal(&series, 1)
        .unwrap();

    assert_eq!(first.scores, second.scores);
}

#[test]
fn test_trend_run_archives_single_winner() {
    let pool = TrendPool::new(vec![
        candidate(7, 0.0),
        CandidateModel::uniform(7, f64::NAN).unwrap(),
        candidate(7, 2.5),
        candidate(7, 4.0),
    ]);
    let mut archive = InMemoryArchive::new();
    archive
        .put(&ArchiveKey::trend(3), &ModelPool::Trend(pool.clone()))
        .unwrap();

    let mut validator = Validator::new(hourly_config(), archive).unwrap();
    let report = validator.validate_trend(&hourly_series(14 * 24), 3).unwrap();

    assert!(report.persisted);
    assert_eq!(report.groups(), 4);
    assert_eq!(report.excluded.len(), 1);
    assert_eq!(report.excluded[0].cell.group, 1);

    let winner = report.selection.unwrap().winners()[0].group;
    assert_eq!(Some(winner), arg_min(&report.scores.column(0)));

    let stored = validator
        .archive()
        .get(&ArchiveKey::trend(3))
        .unwrap()
        .into_trend()
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.get(0), pool.get(winner));
}

#[test]
fn test_trend_without_scores_keeps_candidates() {
    let pool = TrendPool::new(vec![candidate(5, 0.0), candidate(5, 1.0)]);
    let mut archive = InMemoryArchive::new();
    archive
        .put(&ArchiveKey::trend(2), &ModelPool::Trend(pool.clone()))
        .unwrap();

    let mut validator = Validator::new(hourly_config(), archive).unwrap();
    let report = validator.validate_trend(&hourly_series(14 * 24), 2).unwrap();

    assert!(!report.persisted);
    assert!(report.selection.is_none());
    assert_eq!(report.excluded.len(), 2);
    assert_eq!(
        validator.archive().get(&ArchiveKey::trend(2)).unwrap(),
        ModelPool::Trend(pool)
    );
}

#[test]
fn test_missing_candidates_propagate() {
    let mut validator = Validator::new(hourly_config(), InMemoryArchive::new()).unwrap();
    let result = validator.validate_trend(&hourly_series(48), 9);

    assert!(matches!(
        result,
        Err(ForecastError::ArchiveNotFound { iteration: 9, .. })
    ));
}

#[test]
fn test_json_archive_end_to_end() {
    let dir = tempdir().unwrap();
    let mut archive = JsonFileArchive::new(dir.path()).pretty();
    archive
        .put(&ArchiveKey::seasonal(0), &ModelPool::Seasonal(seasonal_pool(2, 24, 7)))
        .unwrap();
    archive
        .put(
            &ArchiveKey::trend(0),
            &ModelPool::Trend(TrendPool::new(vec![candidate(7, 0.3), candidate(7, 1.9)])),
        )
        .unwrap();
    assert!(dir.path().join("0seasonality.json").exists());
    assert!(dir.path().join("0trend.json").exists());

    let series = hourly_series(14 * 24);
    let mut validator = Validator::new(hourly_config(), archive).unwrap();
    assert!(validator.validate_seasonal(&series, 0).unwrap().persisted);
    assert!(validator.validate_trend(&series, 0).unwrap().persisted);

    let reopened = JsonFileArchive::new(dir.path());
    let seasonal = stored_seasonal(&reopened, 0);
    assert_eq!(seasonal.group_count(), 1);
    assert_eq!(seasonal.bucket_count(), 24);

    let trend = reopened.get(&ArchiveKey::trend(0)).unwrap().into_trend().unwrap();
    assert_eq!(trend.len(), 1);
}
