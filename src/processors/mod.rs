pub mod aggregator;
pub mod batch_cleaner;
pub mod diagnostics;
pub mod query_engine;
pub mod record_cleaner;

pub use aggregator::{aggregate_by_driver, most_active_driver, DriverMileage};
pub use batch_cleaner::{BatchCleaner, CleaningOutcome, CleaningReport};
pub use diagnostics::{CollectingSink, DiagnosticSink, NullSink, TracingSink};
pub use query_engine::{by_average_speed_range, by_duration_range, MetricRange};
pub use record_cleaner::{clean, parse_zone, RecordCleaner};
