pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{default_report_filename, extract_batch_date};
pub use progress::ProgressReporter;
