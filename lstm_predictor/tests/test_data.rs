use chrono::{Duration, TimeZone, Utc};
use lstm_predictor::bucket::Bucketizer;
use lstm_predictor::data::{DataLoader, TimeSeries};
use lstm_predictor::resample::LinearResampler;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,value").unwrap();
    writeln!(file, "2024-03-01T00:00:00Z,410.0").unwrap();
    writeln!(file, "2024-03-01T00:07:00Z,").unwrap();
    writeln!(file, "2024-03-01T00:20:00Z,440.0").unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(series.len(), 3);
    assert!(!series.is_empty());

    let resampled = LinearResampler::new(5).unwrap().resample(&series).unwrap();
    assert_eq!(resampled.values(), &[410.0, 417.5, 425.0, 432.5, 440.0]);
    assert_eq!(resampled.min(), 410.0);
    assert_eq!(resampled.max(), 440.0);
}

#[test]
fn test_data_loader_error_handling() {
    // Test with non-existent file
    assert!(DataLoader::from_csv("nonexistent_file.csv").is_err());

    // Test with invalid data format
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,value").unwrap();
    writeln!(file, "yesterday,12.0").unwrap();
    assert!(DataLoader::from_csv(file.path()).is_err());

    // Test with unordered rows
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,value").unwrap();
    writeln!(file, "2024-03-01T01:00:00Z,1.0").unwrap();
    writeln!(file, "2024-03-01T00:00:00Z,2.0").unwrap();
    assert!(DataLoader::from_csv(file.path()).is_err());
}

#[test]
fn test_gappy_series_buckets_cover_every_slot() {
    // Three days of 15 minute data with the whole second afternoon missing
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let (timestamps, values): (Vec<_>, Vec<_>) = (0..288)
        .filter(|i| !(160..190).contains(i))
        .map(|i| (start + Duration::minutes(15 * i), (i % 96) as f64))
        .unzip();
    let series = TimeSeries::new(timestamps, values).unwrap();

    let resampled = LinearResampler::new(15).unwrap().resample(&series).unwrap();
    let buckets = Bucketizer::new(0).unwrap().buckets(&resampled);

    assert_eq!(resampled.len(), 288);
    assert_eq!(buckets.len(), 96);
    assert!(buckets.iter().all(|bucket| bucket.values.len() == 3));
}
