use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{ProcessingError, Result};

/// Logical fields of a journey line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JourneyField {
    JourneyId,
    DriverId,
    StartTime,
    EndTime,
    StartLat,
    StartLon,
    EndLat,
    EndLon,
    StartOdometer,
    EndOdometer,
}

impl JourneyField {
    pub const ALL: [JourneyField; 10] = [
        JourneyField::JourneyId,
        JourneyField::DriverId,
        JourneyField::StartTime,
        JourneyField::EndTime,
        JourneyField::StartLat,
        JourneyField::StartLon,
        JourneyField::EndLat,
        JourneyField::EndLon,
        JourneyField::StartOdometer,
        JourneyField::EndOdometer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            JourneyField::JourneyId => "journey_id",
            JourneyField::DriverId => "driver_id",
            JourneyField::StartTime => "start_time",
            JourneyField::EndTime => "end_time",
            JourneyField::StartLat => "start_lat",
            JourneyField::StartLon => "start_lon",
            JourneyField::EndLat => "end_lat",
            JourneyField::EndLon => "end_lon",
            JourneyField::StartOdometer => "start_odometer",
            JourneyField::EndOdometer => "end_odometer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Maps each logical field to its zero-based column in a delimited line.
///
/// Construction checks that every field is mapped and that the indices form
/// a permutation of `0..field_count`, so lookups never fail afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, usize>", into = "BTreeMap<String, usize>")]
pub struct SchemaMap {
    columns: HashMap<JourneyField, usize>,
}

impl SchemaMap {
    /// Validate a name-to-index mapping.
    pub fn new<I, S>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut columns = HashMap::new();

        for (name, index) in mapping {
            let name = name.as_ref();
            let field = JourneyField::from_name(name).ok_or_else(|| {
                ProcessingError::InvalidSchema(format!("unknown field '{}'", name))
            })?;

            if columns.insert(field, index).is_some() {
                return Err(ProcessingError::InvalidSchema(format!(
                    "field '{}' mapped more than once",
                    name
                )));
            }
        }

        if let Some(missing) = JourneyField::ALL
            .iter()
            .find(|field| !columns.contains_key(*field))
        {
            return Err(ProcessingError::InvalidSchema(format!(
                "missing required field '{}'",
                missing.name()
            )));
        }

        let field_count = columns.len();
        let mut seen = vec![false; field_count];
        for (field, &index) in &columns {
            if index >= field_count || seen[index] {
                return Err(ProcessingError::InvalidSchema(format!(
                    "index {} for field '{}' is out of range or duplicated (expected 0..{})",
                    index,
                    field.name(),
                    field_count
                )));
            }
            seen[index] = true;
        }

        Ok(Self { columns })
    }

    /// The v1 layout:
    /// `journeyId,driverId,startTime,endTime,startLat,startLon,endLat,endLon,startOdometer,endOdometer`
    pub fn v1() -> Self {
        let columns = JourneyField::ALL
            .into_iter()
            .enumerate()
            .map(|(index, field)| (field, index))
            .collect();
        Self { columns }
    }

    pub fn field_count(&self) -> usize {
        self.columns.len()
    }

    pub fn index_of(&self, field: JourneyField) -> usize {
        self.columns[&field]
    }
}

impl Default for SchemaMap {
    fn default() -> Self {
        Self::v1()
    }
}

impl TryFrom<BTreeMap<String, usize>> for SchemaMap {
    type Error = ProcessingError;

    fn try_from(mapping: BTreeMap<String, usize>) -> Result<Self> {
        Self::new(mapping)
    }
}

impl From<SchemaMap> for BTreeMap<String, usize> {
    fn from(schema: SchemaMap) -> Self {
        schema
            .columns
            .into_iter()
            .map(|(field, index)| (field.name().to_string(), index))
            .collect()
    }
}
