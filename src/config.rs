use crate::error::Result;
use crate::models::SchemaMap;
use crate::processors::{parse_zone, MetricRange, RecordCleaner};
use crate::utils::constants::{
    DEFAULT_MIN_DURATION_MINUTES, DEFAULT_MIN_SPEED_KPH, DEFAULT_TIMEZONE, ENV_PREFIX,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Settings for one processing run.
///
/// Layered lowest to highest: built-in defaults, an optional config file,
/// `JOURNEY_*` environment variables, then command-line overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProcessorConfig {
    /// IANA zone used to read both start and end timestamps.
    #[validate(length(min = 1))]
    pub timezone: String,

    pub schema: SchemaMap,

    #[validate(range(min = 0.0))]
    pub min_duration_minutes: f64,

    #[validate(range(min = 0.0))]
    pub min_speed_kph: f64,

    /// `None` leaves the speed range open above.
    #[validate(range(min = 0.0))]
    pub max_speed_kph: Option<f64>,

    #[validate(range(min = 1))]
    pub max_workers: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            schema: SchemaMap::v1(),
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            min_speed_kph: DEFAULT_MIN_SPEED_KPH,
            max_speed_kph: None,
            max_workers: num_cpus::get(),
        }
    }
}

impl ProcessorConfig {
    /// Load from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: ProcessorConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validated()
    }

    /// Check value ranges and that the zone name resolves.
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        parse_zone(&self.timezone)?;
        Ok(self)
    }

    pub fn record_cleaner(&self) -> Result<RecordCleaner> {
        RecordCleaner::with_zone_name(self.schema.clone(), &self.timezone)
    }

    pub fn duration_range(&self) -> MetricRange {
        MetricRange::at_least(self.min_duration_minutes)
    }

    pub fn speed_range(&self) -> MetricRange {
        MetricRange::with_optional_max(self.min_speed_kph, self.max_speed_kph)
    }
}
