use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use journey_processor::models::{JourneyRecord, SchemaMap};
use journey_processor::processors::{
    aggregate_by_driver, by_average_speed_range, by_duration_range, most_active_driver,
    BatchCleaner, MetricRange, NullSink, RecordCleaner,
};

// Create test lines for benchmarking, roughly one in ten of them bad
fn create_test_lines(count: usize) -> Vec<String> {
    let base_ms: i64 = 1_710_489_600_000; // 2024-03-15T08:00:00Z

    (0..count)
        .map(|i| {
            let driver = i % 50;
            let start = base_ms + (i as i64) * 60_000;
            let end = start + 600_000 + (i as i64 % 180) * 60_000;
            let start_odo = 10_000.0 + i as f64;
            let end_odo = start_odo + 5.0 + (i % 90) as f64;

            match i % 10 {
                7 => format!("J{},D{},{},{},51.5,-0.1,51.6,-0.2,{}", i, driver, start, end, start_odo),
                9 => format!("J{},D{},oops,{},51.5,-0.1,51.6,-0.2,{},{}", i, driver, end, start_odo, end_odo),
                _ => format!(
                    "J{},D{},{},{},51.5,-0.1,51.6,-0.2,{},{}",
                    i, driver, start, end, start_odo, end_odo
                ),
            }
        })
        .collect()
}

fn clean_records(lines: &[String]) -> Vec<JourneyRecord> {
    let cleaner = RecordCleaner::new(SchemaMap::v1(), chrono_tz::UTC);
    lines.iter().filter_map(|l| cleaner.clean(l).ok()).collect()
}

fn benchmark_record_cleaner(c: &mut Criterion) {
    let cleaner = RecordCleaner::new(SchemaMap::v1(), chrono_tz::Europe::London);
    let line = "J1,D1,1710489600000,1710495000000,51.5074,-0.1278,51.7520,-1.2577,10250.5,10342.0";

    c.bench_function("clean_single_line", |b| {
        b.iter(|| black_box(cleaner.clean(black_box(line))))
    });
}

fn benchmark_batch_cleaning(c: &mut Criterion) {
    let lines = create_test_lines(50_000);
    let mut group = c.benchmark_group("batch_cleaning");

    for workers in [1, 4] {
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            let batch = BatchCleaner::new(RecordCleaner::new(SchemaMap::v1(), chrono_tz::UTC))
                .with_max_workers(workers);
            b.iter(|| black_box(batch.clean_lines(&lines, &NullSink, None)))
        });
    }

    group.finish();
}

fn benchmark_queries(c: &mut Criterion) {
    let records = clean_records(&create_test_lines(50_000));

    c.bench_function("duration_and_speed_filters", |b| {
        b.iter(|| {
            let long = by_duration_range(&records, MetricRange::at_least(90.0));
            let band = by_average_speed_range(&records, MetricRange::new(20.0, 80.0));
            black_box((long.len(), band.len()))
        })
    });

    c.bench_function("driver_aggregation", |b| {
        b.iter(|| {
            let mileage = aggregate_by_driver(&records);
            black_box(most_active_driver(&mileage).map(|(id, _)| id.to_string()))
        })
    });
}

criterion_group!(
    benches,
    benchmark_record_cleaner,
    benchmark_batch_cleaning,
    benchmark_queries
);
criterion_main!(benches);
