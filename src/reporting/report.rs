use crate::error::Result;
use crate::models::JourneyRecord;
use crate::processors::{
    aggregate_by_driver, by_average_speed_range, by_duration_range, most_active_driver,
    CleaningReport, DriverMileage, MetricRange,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const NO_MATCHES_MESSAGE: &str = "No journeys matched";
pub const NO_JOURNEYS_MESSAGE: &str = "No journeys found";

/// Journeys selected by a query, in input order.
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    pub journeys: Vec<&'a JourneyRecord>,
}

impl<'a> QueryOutcome<'a> {
    pub fn new(journeys: Vec<&'a JourneyRecord>) -> Self {
        Self { journeys }
    }

    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.journeys.len()
    }

    /// One line per journey, or the no-match message.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return format!("{}\n", NO_MATCHES_MESSAGE);
        }

        self.journeys
            .iter()
            .map(|journey| format!("  {}\n", describe_journey(journey)))
            .collect()
    }
}

/// Journeys lasting at least `min_minutes`.
pub fn journeys_at_least_duration<'a, I>(records: I, min_minutes: f64) -> QueryOutcome<'a>
where
    I: IntoIterator<Item = &'a JourneyRecord>,
{
    QueryOutcome::new(by_duration_range(records, MetricRange::at_least(min_minutes)))
}

/// Journeys whose average speed falls in `range`.
pub fn journeys_in_speed_range<'a, I>(records: I, range: MetricRange) -> QueryOutcome<'a>
where
    I: IntoIterator<Item = &'a JourneyRecord>,
{
    QueryOutcome::new(by_average_speed_range(records, range))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverTotal {
    pub driver_id: String,
    pub total_km: f64,
}

/// Everything printed or written for one batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_date: Option<NaiveDate>,
    pub timezone: String,
    pub cleaning: CleaningReport,
    pub duration_range: MetricRange,
    pub long_journeys: Vec<JourneyRecord>,
    pub speed_range: MetricRange,
    pub speed_filtered_journeys: Vec<JourneyRecord>,
    pub driver_mileage: DriverMileage,
    pub most_active_driver: Option<DriverTotal>,
}

impl BatchReport {
    pub fn build(
        batch_date: Option<NaiveDate>,
        timezone: &str,
        cleaning: CleaningReport,
        records: &[JourneyRecord],
        duration_range: MetricRange,
        speed_range: MetricRange,
    ) -> Self {
        let long_journeys = by_duration_range(records, duration_range)
            .into_iter()
            .cloned()
            .collect();
        let speed_filtered_journeys = by_average_speed_range(records, speed_range)
            .into_iter()
            .cloned()
            .collect();

        let driver_mileage = aggregate_by_driver(records);
        let most_active_driver =
            most_active_driver(&driver_mileage).map(|(driver_id, total_km)| DriverTotal {
                driver_id: driver_id.to_string(),
                total_km,
            });

        Self {
            batch_date,
            timezone: timezone.to_string(),
            cleaning,
            duration_range,
            long_journeys,
            speed_range,
            speed_filtered_journeys,
            driver_mileage,
            most_active_driver,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let batch = self
            .batch_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        out.push_str(&format!(
            "=== Journey Report (batch {}, {}) ===\n\n",
            batch, self.timezone
        ));
        out.push_str(&self.cleaning.summary());

        out.push_str(&format!(
            "\nJourneys lasting {}:\n",
            describe_range(&self.duration_range, "min")
        ));
        out.push_str(&QueryOutcome::new(self.long_journeys.iter().collect()).render());

        out.push_str(&format!(
            "\nJourneys averaging {}:\n",
            describe_range(&self.speed_range, "km/h")
        ));
        out.push_str(&QueryOutcome::new(self.speed_filtered_journeys.iter().collect()).render());

        out.push_str("\nMileage by driver:\n");
        if self.driver_mileage.is_empty() {
            out.push_str(&format!("{}\n", NO_JOURNEYS_MESSAGE));
        } else {
            for (driver_id, total) in &self.driver_mileage {
                out.push_str(&format!("  {}: {:.2} km\n", driver_id, total));
            }
        }

        out.push_str("\nMost active driver: ");
        match &self.most_active_driver {
            Some(leader) => out.push_str(&format!(
                "{} ({:.2} km)\n",
                leader.driver_id, leader.total_km
            )),
            None => out.push_str(&format!("{}\n", NO_JOURNEYS_MESSAGE)),
        }

        out
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

fn describe_journey(journey: &JourneyRecord) -> String {
    format!(
        "{} driver={} {} -> {} {:.2} km in {:.2} min ({:.2} km/h)",
        journey.journey_id,
        journey.driver_id,
        journey.start_time.format("%Y-%m-%d %H:%M:%S"),
        journey.end_time.format("%Y-%m-%d %H:%M:%S"),
        journey.distance_km,
        journey.duration,
        journey.avg_speed
    )
}

fn describe_range(range: &MetricRange, unit: &str) -> String {
    if range.max.is_infinite() {
        format!("at least {} {}", range.min, unit)
    } else {
        format!("between {} and {} {}", range.min, range.max, unit)
    }
}
