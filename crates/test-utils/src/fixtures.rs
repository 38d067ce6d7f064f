//! Common test fixtures for EDR tests.
//!
//! This module provides pre-defined data matching the simulated dataset the
//! service serves, plus small hand-checked record scenarios.

use crate::RecordTuple;

/// The regional pressure dataset: 10 regions observed at 2 times.
pub mod pressure {
    use crate::RecordTuple;

    /// Region identifiers, in dataset order.
    pub const REGIONS: [&str; 10] = ["01", "02", "03", "04", "07", "08", "09", "10", "11", "12"];

    /// QNH per region, index-aligned with `REGIONS`.
    pub const QNH: [&str; 10] = [
        "1000", "1005", "994", "1010", "1008", "1012", "1011", "1009", "1007", "1002",
    ];

    /// Observation times.
    pub const TIMES: [&str; 2] = ["20250720T0000Z", "20250720T0100Z"];

    /// Number of records in the dataset.
    pub const RECORD_COUNT: usize = REGIONS.len() * TIMES.len();

    /// The dataset in arrival order: every region at the first time, then
    /// every region at the second.
    pub fn records() -> Vec<RecordTuple> {
        TIMES
            .iter()
            .flat_map(|time| {
                REGIONS.iter().zip(QNH.iter()).map(move |(region, qnh)| {
                    (region.to_string(), time.to_string(), qnh.to_string())
                })
            })
            .collect()
    }
}

/// Collection identifiers in the default catalogue.
pub mod collections {
    pub const REGIONAL_PRESSURE: &str = "regional-pressure-settings";
    pub const OPEN_RUNWAY: &str = "open-runway";
    pub const DE_ICING: &str = "de-icing";
}

/// Output format tokens as clients send them.
pub mod format_tokens {
    pub const CSV: &str = "csv";
    pub const GEOJSON: &str = "geojson";
    pub const COVERAGEJSON: &str = "coveragejson";
    pub const NETCDF4: &str = "netcdf4";
    pub const UNKNOWN: &str = "xml";
}

/// Two entities with interleaved arrivals: `A, B, A`.
pub fn interleaved_records() -> Vec<RecordTuple> {
    vec![
        ("A".to_string(), "t1".to_string(), "v1".to_string()),
        ("B".to_string(), "t2".to_string(), "v2".to_string()),
        ("A".to_string(), "t3".to_string(), "v3".to_string()),
    ]
}

/// Records whose fields need CSV quoting.
pub fn quoting_records() -> Vec<RecordTuple> {
    vec![
        ("North, East".to_string(), "20250720T0000Z".to_string(), "1000".to_string()),
        ("say \"hi\"".to_string(), "20250720T0000Z".to_string(), "1001".to_string()),
    ]
}
