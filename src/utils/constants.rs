/// Input line format
pub const FIELD_DELIMITER: char = ',';
pub const V1_FIELD_COUNT: usize = 10;

/// Configuration defaults
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_MIN_DURATION_MINUTES: f64 = 90.0;
pub const DEFAULT_MIN_SPEED_KPH: f64 = 0.0;
pub const ENV_PREFIX: &str = "JOURNEY";

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_REJECTION_SAMPLES: usize = 10;

/// Report output
pub const REPORT_OUTPUT_DIR: &str = "output";
pub const REPORT_FILE_PREFIX: &str = "journey-report";
