//! Pure filters over cleaned journeys.
//!
//! Every filter keeps input order and borrows from its input, so a filtered
//! result can be fed straight back into another filter.

use crate::models::JourneyRecord;
use serde::Serialize;

/// Inclusive `[min, max]` bounds on a journey metric.
///
/// An unbounded `max` serializes to JSON as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[min, +inf]`
    pub fn at_least(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Bounds where `None` means unbounded above.
    pub fn with_optional_max(min: f64, max: Option<f64>) -> Self {
        Self::new(min, max.unwrap_or(f64::INFINITY))
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for MetricRange {
    fn default() -> Self {
        Self::at_least(0.0)
    }
}

/// Journeys whose duration in minutes lies within `range`.
pub fn by_duration_range<'a, I>(records: I, range: MetricRange) -> Vec<&'a JourneyRecord>
where
    I: IntoIterator<Item = &'a JourneyRecord>,
{
    filter_by(records, |record| range.contains(record.duration))
}

/// Journeys whose average speed in km/h lies within `range`.
pub fn by_average_speed_range<'a, I>(records: I, range: MetricRange) -> Vec<&'a JourneyRecord>
where
    I: IntoIterator<Item = &'a JourneyRecord>,
{
    filter_by(records, |record| range.contains(record.avg_speed))
}

fn filter_by<'a, I, P>(records: I, predicate: P) -> Vec<&'a JourneyRecord>
where
    I: IntoIterator<Item = &'a JourneyRecord>,
    P: Fn(&JourneyRecord) -> bool,
{
    records
        .into_iter()
        .filter(|record| predicate(*record))
        .collect()
}
