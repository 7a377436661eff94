use journey_processor::config::ProcessorConfig;
use journey_processor::models::SchemaMap;
use journey_processor::processors::{
    aggregate_by_driver, by_average_speed_range, by_duration_range, most_active_driver,
    BatchCleaner, CollectingSink, MetricRange, RecordCleaner,
};
use journey_processor::readers::LineReader;
use journey_processor::reporting::{journeys_at_least_duration, BatchReport};
use journey_processor::utils::extract_batch_date;
use journey_processor::RejectionKind;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::TempDir;

const BATCH: &str = "\
J1,D1,1000,1000000,34.0,-118.0,34.1,-118.1,100.0,150.0
J2,D1,1000,500,34.0,-118.0,34.1,-118.1,100.0,150.0
J3,D1,abc,1000000,34.0,-118.0,34.1,-118.1,100.0,150.0
J4,D1,0,5400000,34.0,-118.0,34.1,-118.1,150.0,180.0

J5,D2,0,7200000,34.0,-118.0,34.1,-118.1,1000.0,1100.0
J6,D2,0,3600000,34.0,-118.0,34.1,-118.1,1100.0
J7,D3,0,3600000,34.0,-118.0,34.1,-118.1,20.0,10.0
";

#[test]
fn test_file_to_report_pipeline() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("journeys_2024-03-15.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(BATCH.as_bytes()).unwrap();

    let lines = LineReader::new().read_lines(&path).unwrap();
    assert_eq!(lines.len(), 7);

    let config = ProcessorConfig::default().validated().unwrap();
    let sink = CollectingSink::new();
    let outcome = BatchCleaner::new(config.record_cleaner().unwrap())
        .with_max_workers(2)
        .with_chunk_size(2)
        .clean_lines(&lines, &sink, None)
        .unwrap();

    let ids: Vec<&str> = outcome.records.iter().map(|r| r.journey_id.as_str()).collect();
    assert_eq!(ids, vec!["J1", "J4", "J5"]);
    assert_eq!(outcome.report.rejected_of(RejectionKind::InvalidData), 2);
    assert_eq!(outcome.report.rejected_of(RejectionKind::ParseFailure), 1);
    assert_eq!(outcome.report.rejected_of(RejectionKind::MalformedFormat), 1);

    let rejected_lines: Vec<String> = sink
        .into_rejections()
        .into_iter()
        .map(|r| r.line[..2].to_string())
        .collect();
    assert_eq!(rejected_lines, vec!["J2", "J3", "J6", "J7"]);

    let long = journeys_at_least_duration(&outcome.records, 90.0);
    let long_ids: Vec<&str> = long.journeys.iter().map(|r| r.journey_id.as_str()).collect();
    assert_eq!(long_ids, vec!["J4", "J5"]);

    let mileage = aggregate_by_driver(&outcome.records);
    assert_eq!(mileage.len(), 2);
    assert_eq!(mileage["D1"], 80.0);
    assert_eq!(mileage["D2"], 100.0);
    assert_eq!(most_active_driver(&mileage), Some(("D2", 100.0)));

    let batch_date = extract_batch_date(&path).ok();
    let report = BatchReport::build(
        batch_date,
        &config.timezone,
        outcome.report.clone(),
        &outcome.records,
        config.duration_range(),
        config.speed_range(),
    );
    let text = report.render();
    assert!(text.contains("batch 2024-03-15"));
    assert!(text.contains("Most active driver: D2 (100.00 km)"));
}

#[test]
fn test_unbounded_duration_filter_returns_all_records() {
    let cleaner = RecordCleaner::new(SchemaMap::v1(), chrono_tz::UTC);
    let records: Vec<_> = BATCH
        .lines()
        .filter_map(|line| cleaner.clean(line).ok())
        .collect();

    let all = by_duration_range(&records, MetricRange::default());
    assert_eq!(all.len(), records.len());
    assert!(all.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
}

#[test]
fn test_metric_invariants_hold_for_accepted_records() {
    let cleaner = RecordCleaner::new(SchemaMap::v1(), chrono_tz::UTC);
    let records: Vec<_> = BATCH
        .lines()
        .filter_map(|line| cleaner.clean(line).ok())
        .collect();

    for record in &records {
        assert_eq!(record.distance_km, record.end_odometer - record.start_odometer);
        assert!(record.distance_km > 0.0);
        assert!(record.end_time > record.start_time);
        assert!(record.avg_speed.is_finite());
    }

    let speedy = by_average_speed_range(&records, MetricRange::new(50.0, 60.0));
    let ids: Vec<&str> = speedy.iter().map(|r| r.journey_id.as_str()).collect();
    assert_eq!(ids, vec!["J5"]);
}
