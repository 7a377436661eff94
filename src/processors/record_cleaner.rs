use crate::error::{ProcessingError, Rejection, RejectionReason, Result};
use crate::models::{JourneyField, JourneyFields, JourneyRecord, SchemaMap};
use crate::utils::constants::FIELD_DELIMITER;
use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;

type Cleaned = std::result::Result<JourneyRecord, RejectionReason>;

/// Turns raw journey lines into validated records.
///
/// Cleaning depends only on the line, the schema and the zone. Nothing is
/// logged here; rejections go back to the caller.
#[derive(Debug, Clone)]
pub struct RecordCleaner {
    schema: SchemaMap,
    zone: Tz,
}

impl RecordCleaner {
    pub fn new(schema: SchemaMap, zone: Tz) -> Self {
        Self { schema, zone }
    }

    /// Build a cleaner from an IANA zone name such as `Europe/London`.
    pub fn with_zone_name(schema: SchemaMap, zone: &str) -> Result<Self> {
        Ok(Self::new(schema, parse_zone(zone)?))
    }

    pub fn schema(&self) -> &SchemaMap {
        &self.schema
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Clean one line, keeping the original text on rejection.
    pub fn clean(&self, line: &str) -> std::result::Result<JourneyRecord, Rejection> {
        self.clean_tokens(line)
            .map_err(|reason| Rejection::new(line, reason))
    }

    fn clean_tokens(&self, line: &str) -> Cleaned {
        let tokens: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();

        if tokens.len() != self.schema.field_count() {
            return Err(RejectionReason::WrongFieldCount {
                expected: self.schema.field_count(),
                found: tokens.len(),
            });
        }

        let token = |field: JourneyField| tokens[self.schema.index_of(field)];

        let start_time = self.parse_timestamp(JourneyField::StartTime, &token)?;
        let end_time = self.parse_timestamp(JourneyField::EndTime, &token)?;
        let start_odometer = parse_odometer(JourneyField::StartOdometer, &token)?;
        let end_odometer = parse_odometer(JourneyField::EndOdometer, &token)?;

        if end_time <= start_time {
            return Err(RejectionReason::EndNotAfterStart {
                start: start_time,
                end: end_time,
            });
        }

        if end_odometer <= start_odometer {
            return Err(RejectionReason::OdometerNotIncreasing {
                start: start_odometer,
                end: end_odometer,
            });
        }

        Ok(JourneyRecord::new(JourneyFields {
            journey_id: token(JourneyField::JourneyId).to_string(),
            driver_id: token(JourneyField::DriverId).to_string(),
            start_time,
            end_time,
            start_lat: token(JourneyField::StartLat).to_string(),
            start_lon: token(JourneyField::StartLon).to_string(),
            end_lat: token(JourneyField::EndLat).to_string(),
            end_lon: token(JourneyField::EndLon).to_string(),
            start_odometer,
            end_odometer,
        }))
    }

    /// Interpret epoch milliseconds as a civil date-time in the configured zone.
    fn parse_timestamp<'a>(
        &self,
        field: JourneyField,
        token: impl Fn(JourneyField) -> &'a str,
    ) -> std::result::Result<NaiveDateTime, RejectionReason> {
        let value = token(field);
        let millis = value
            .parse::<i64>()
            .map_err(|e| unparseable(field, value, e.to_string()))?;

        self.zone
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.naive_local())
            .ok_or_else(|| unparseable(field, value, "timestamp out of range".to_string()))
    }
}

/// Clean a single line with an explicit schema and zone.
pub fn clean(
    line: &str,
    schema: &SchemaMap,
    zone: Tz,
) -> std::result::Result<JourneyRecord, Rejection> {
    RecordCleaner::new(schema.clone(), zone).clean(line)
}

pub fn parse_zone(zone: &str) -> Result<Tz> {
    zone.trim()
        .parse::<Tz>()
        .map_err(|_| ProcessingError::UnknownTimeZone(zone.to_string()))
}

fn parse_odometer<'a>(
    field: JourneyField,
    token: impl Fn(JourneyField) -> &'a str,
) -> std::result::Result<f64, RejectionReason> {
    let value = token(field);
    let reading = value
        .parse::<f64>()
        .map_err(|e| unparseable(field, value, e.to_string()))?;

    if !reading.is_finite() {
        return Err(unparseable(field, value, "not a finite number".to_string()));
    }

    Ok(reading)
}

fn unparseable(field: JourneyField, value: &str, cause: String) -> RejectionReason {
    RejectionReason::Unparseable {
        field: field.name(),
        value: value.to_string(),
        cause,
    }
}
