//! Observation records and per-entity grouping.
//!
//! Records arrive as a flat list of `(entity, timestamp, value)` triples.
//! The feature and coverage encoders want them grouped per entity, with the
//! time and value sequences kept in arrival order.

use chrono::{DateTime, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::EdrError;

/// A single observation: one measured value for one entity at one time.
///
/// The value is kept as text; encoders never parse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Entity (region) identifier.
    pub entity_id: String,

    /// Observation time, ISO 8601 (basic or extended).
    pub timestamp: String,

    /// Measured value as a numeric string.
    pub value: String,
}

impl ObservationRecord {
    /// Create a new record.
    pub fn new(
        entity_id: impl Into<String>,
        timestamp: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            timestamp: timestamp.into(),
            value: value.into(),
        }
    }

    /// Check that the record is well formed.
    ///
    /// The entity id must be non-empty, the timestamp must be ISO 8601
    /// (`20250720T0000Z` or RFC 3339) and the value must be numeric.
    pub fn validate(&self) -> Result<(), EdrError> {
        if self.entity_id.trim().is_empty() {
            return Err(EdrError::MalformedRecord(format!(
                "empty entity id (timestamp '{}')",
                self.timestamp
            )));
        }

        if !is_iso8601(&self.timestamp) {
            return Err(EdrError::MalformedRecord(format!(
                "entity '{}': invalid timestamp '{}'",
                self.entity_id, self.timestamp
            )));
        }

        match self.value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(()),
            _ => Err(EdrError::MalformedRecord(format!(
                "entity '{}' at {}: non-numeric value '{}'",
                self.entity_id, self.timestamp, self.value
            ))),
        }
    }
}

impl<E, T, V> From<(E, T, V)> for ObservationRecord
where
    E: Into<String>,
    T: Into<String>,
    V: Into<String>,
{
    fn from((entity_id, timestamp, value): (E, T, V)) -> Self {
        Self::new(entity_id, timestamp, value)
    }
}

/// Names given to the three record fields in an encoded output.
///
/// Used for the CSV header and for GeoJSON property keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub entity: String,
    pub time: String,
    pub value: String,
}

impl FieldNames {
    pub fn new(
        entity: impl Into<String>,
        time: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            time: time.into(),
            value: value.into(),
        }
    }

    /// Names must be non-blank and pairwise distinct; a repeated GeoJSON
    /// key would overwrite the entity id or one of the series.
    pub fn validate(&self) -> Result<(), EdrError> {
        let names = [&self.entity, &self.time, &self.value];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(EdrError::InvalidDescriptor(format!(
                "blank field name in {}",
                self
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(EdrError::InvalidDescriptor(format!(
                    "field name '{}' used twice in {}",
                    name, self
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for FieldNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.entity, self.time, self.value)
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::new("entity", "time", "value")
    }
}

/// Basic-format timestamps: `20250720T0000Z` and `20250720T000000Z`.
const BASIC_FORMATS: [&str; 2] = ["%Y%m%dT%H%MZ", "%Y%m%dT%H%M%SZ"];

fn is_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || BASIC_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}

/// Parallel time and value sequences for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Series {
    /// Timestamps in arrival order.
    pub timestamps: Vec<String>,

    /// Values, index-aligned with `timestamps`.
    pub values: Vec<String>,
}

impl Series {
    /// Number of `(timestamp, value)` pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, timestamp: &str, value: &str) {
        self.timestamps.push(timestamp.to_string());
        self.values.push(value.to_string());
    }
}

/// Records grouped by entity.
///
/// Entities iterate in the order they were first seen. Consumers that need
/// a canonical order use [`GroupedSeries::sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedSeries {
    entities: IndexMap<String, Series>,
}

impl GroupedSeries {
    /// Group records in a single pass.
    pub fn group(records: &[ObservationRecord]) -> Self {
        let mut entities: IndexMap<String, Series> = IndexMap::new();
        for record in records {
            entities
                .entry(record.entity_id.clone())
                .or_default()
                .push(&record.timestamp, &record.value);
        }
        Self { entities }
    }

    /// Series for one entity.
    pub fn get(&self, entity_id: &str) -> Option<&Series> {
        self.entities.get(entity_id)
    }

    /// Number of distinct entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entities were grouped.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total number of pairs across all entities.
    pub fn total_pairs(&self) -> usize {
        self.entities.values().map(Series::len).sum()
    }

    /// Iterate in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.entities.iter().map(|(id, s)| (id.as_str(), s))
    }

    /// Entities sorted by id, for deterministic emission.
    pub fn sorted(&self) -> Vec<(&str, &Series)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Distinct timestamps across all entities, sorted.
    pub fn distinct_timestamps(&self) -> Vec<&str> {
        let mut times: Vec<&str> = self
            .entities
            .values()
            .flat_map(|s| s.timestamps.iter().map(String::as_str))
            .collect();
        times.sort_unstable();
        times.dedup();
        times
    }
}
