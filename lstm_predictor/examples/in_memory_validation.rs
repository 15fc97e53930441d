use chrono::{Duration, TimeZone, Utc};
use lstm_predictor::{
    ArchiveKey, CandidateModel, InMemoryArchive, ModelArchive, ModelPool, SeasonalPool, TimeSeries,
    TrendPool, Validator, ValidatorConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two weeks of hourly consumption with a daily cycle
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps = (0..14 * 24).map(|i| start + Duration::hours(i)).collect();
    let values = (0..14 * 24)
        .map(|i| 500.0 + 200.0 * ((i % 24) as f64 / 24.0 * std::f64::consts::TAU).sin())
        .collect();
    let series = TimeSeries::new(timestamps, values)?;
    println!("Generated {} hourly observations", series.len());

    // Three candidate groups for every hour of the day, plus three trend candidates
    let mut archive = InMemoryArchive::new();
    let groups = (0..3)
        .map(|g| {
            (0..24)
                .map(|_| CandidateModel::uniform(7, 0.3 * (g as f64 + 1.0)))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    archive.put(&ArchiveKey::seasonal(1), &ModelPool::Seasonal(SeasonalPool::new(groups)?))?;

    let trend = (0..3)
        .map(|g| CandidateModel::uniform(7, -0.4 * (g as f64 + 1.0)))
        .collect::<Result<Vec<_>, _>>()?;
    archive.put(&ArchiveKey::trend(1), &ModelPool::Trend(TrendPool::new(trend)))?;

    let config = ValidatorConfig::default().with_interval_minutes(60).with_shuffle_seed(7);
    let mut validator = Validator::new(config, archive)?;

    let seasonal = validator.validate_seasonal(&series, 1)?;
    println!("Seasonal: {} groups x {} buckets", seasonal.groups(), seasonal.buckets());
    if let Some(selection) = &seasonal.selection {
        for cell in selection.winners() {
            println!(
                "  bucket {:>2}: group {} (rmse {:.4})",
                cell.bucket,
                cell.group,
                seasonal.scores.get(*cell).unwrap_or(f64::NAN)
            );
        }
    }

    let trend = validator.validate_trend(&series, 1)?;
    if let Some(selection) = &trend.selection {
        println!("Trend winner: group {}", selection.winners()[0].group);
    }

    Ok(())
}
