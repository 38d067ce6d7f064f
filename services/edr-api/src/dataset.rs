//! Simulated observation data served by the data query endpoints.

use anyhow::{Context, Result};
use edr_protocol::ObservationRecord;
use std::collections::HashMap;

/// Collection served with the regional pressure records.
pub const REGIONAL_PRESSURE: &str = "regional-pressure-settings";

const REGIONS: [(&str, &str); 10] = [
    ("01", "1000"),
    ("02", "1005"),
    ("03", "994"),
    ("04", "1010"),
    ("07", "1008"),
    ("08", "1012"),
    ("09", "1011"),
    ("10", "1009"),
    ("11", "1007"),
    ("12", "1002"),
];

const TIMES: [&str; 2] = ["20250720T0000Z", "20250720T0100Z"];

/// Records per collection id. Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: HashMap<String, Vec<ObservationRecord>>,
}

impl Dataset {
    /// The fixed regional QNH dataset: every region at each time.
    pub fn simulated() -> Self {
        let records = TIMES
            .iter()
            .flat_map(|time| {
                REGIONS
                    .iter()
                    .map(move |(region, qnh)| ObservationRecord::new(*region, *time, *qnh))
            })
            .collect();

        Self::default().with_records(REGIONAL_PRESSURE, records)
    }

    /// Replace the records served for a collection.
    pub fn with_records(mut self, collection_id: impl Into<String>, records: Vec<ObservationRecord>) -> Self {
        self.records.insert(collection_id.into(), records);
        self
    }

    /// Records for a collection; empty when none are loaded.
    pub fn records(&self, collection_id: &str) -> &[ObservationRecord] {
        self.records
            .get(collection_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total record count across collections.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate every record.
    pub fn validate(&self) -> Result<()> {
        for (collection_id, records) in &self.records {
            for record in records {
                record
                    .validate()
                    .with_context(|| format!("Invalid record in collection '{}'", collection_id))?;
            }
        }
        Ok(())
    }
}
