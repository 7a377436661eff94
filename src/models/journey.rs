use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: f64 = 60_000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// A validated journey with its derived metrics.
///
/// Only [`JourneyRecord::new`] builds one, and it is never modified afterwards.
/// Coordinates are carried through exactly as they appeared in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyRecord {
    pub journey_id: String,
    pub driver_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_lat: String,
    pub start_lon: String,
    pub end_lat: String,
    pub end_lon: String,
    pub start_odometer: f64,
    pub end_odometer: f64,

    /// `end_odometer - start_odometer`
    pub distance_km: f64,
    pub duration_ms: i64,
    /// Elapsed minutes.
    pub duration: f64,
    /// Kilometres per hour, 0.0 for a zero-length duration.
    pub avg_speed: f64,
}

/// Raw journey values before derivation.
#[derive(Debug, Clone)]
pub struct JourneyFields {
    pub journey_id: String,
    pub driver_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_lat: String,
    pub start_lon: String,
    pub end_lat: String,
    pub end_lon: String,
    pub start_odometer: f64,
    pub end_odometer: f64,
}

impl JourneyRecord {
    /// Derive distance, duration and average speed from already-validated fields.
    pub fn new(fields: JourneyFields) -> Self {
        let distance_km = fields.end_odometer - fields.start_odometer;
        let duration_ms = (fields.end_time - fields.start_time).num_milliseconds();
        let duration = duration_ms as f64 / MS_PER_MINUTE;
        let avg_speed = average_speed_kph(distance_km, duration);

        Self {
            journey_id: fields.journey_id,
            driver_id: fields.driver_id,
            start_time: fields.start_time,
            end_time: fields.end_time,
            start_lat: fields.start_lat,
            start_lon: fields.start_lon,
            end_lat: fields.end_lat,
            end_lon: fields.end_lon,
            start_odometer: fields.start_odometer,
            end_odometer: fields.end_odometer,
            distance_km,
            duration_ms,
            duration,
            avg_speed,
        }
    }
}

fn average_speed_kph(distance_km: f64, duration_minutes: f64) -> f64 {
    if duration_minutes == 0.0 {
        return 0.0;
    }
    distance_km / (duration_minutes / MINUTES_PER_HOUR)
}
