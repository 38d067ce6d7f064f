//! Test data generators for creating synthetic observation records.
//!
//! These generators create predictable, verifiable record sets that can be
//! used across the test suite and in benchmarks.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::RecordTuple;

/// Two-digit region id for entity index `i` (0 -> "01").
pub fn region_id(i: usize) -> String {
    format!("{:02}", i + 1)
}

/// Basic-format timestamp for hourly step `step` after 2025-07-20T00:00Z.
///
/// # Example
///
/// ```
/// use test_utils::hourly_timestamp;
///
/// assert_eq!(hourly_timestamp(0), "20250720T0000Z");
/// assert_eq!(hourly_timestamp(25), "20250721T0100Z");
/// ```
pub fn hourly_timestamp(step: usize) -> String {
    let start: NaiveDateTime = NaiveDate::from_ymd_opt(2025, 7, 20)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start time");
    (start + Duration::hours(step as i64))
        .format("%Y%m%dT%H%MZ")
        .to_string()
}

/// Deterministic pressure-like value for an entity at a step, in 980..1030.
pub fn pressure_value(entity: usize, step: usize) -> String {
    (980 + (entity * 7 + step * 3) % 50).to_string()
}

/// Creates `entities * steps` records in time-major order.
///
/// All entities are observed at step 0, then all at step 1, and so on,
/// which is how the simulated dataset arrives.
///
/// # Example
///
/// ```
/// use test_utils::synthetic_records;
///
/// let records = synthetic_records(3, 2);
/// assert_eq!(records.len(), 6);
/// assert_eq!(records[0].0, "01");
/// assert_eq!(records[3].0, "01");
/// ```
pub fn synthetic_records(entities: usize, steps: usize) -> Vec<RecordTuple> {
    let mut records = Vec::with_capacity(entities * steps);
    for step in 0..steps {
        let time = hourly_timestamp(step);
        for entity in 0..entities {
            records.push((region_id(entity), time.clone(), pressure_value(entity, step)));
        }
    }
    records
}

/// Creates records with entities arriving in a scrambled order.
///
/// Entity `i` at step `s` is emitted at position `(i * stride + s) % entities`
/// within each step, with `stride` coprime to most small entity counts.
pub fn scrambled_records(entities: usize, steps: usize) -> Vec<RecordTuple> {
    const STRIDE: usize = 7;
    let mut records = Vec::with_capacity(entities * steps);
    for step in 0..steps {
        let time = hourly_timestamp(step);
        let mut order: Vec<usize> = (0..entities).collect();
        order.sort_by_key(|i| (i * STRIDE + step) % entities.max(1));
        for entity in order {
            records.push((region_id(entity), time.clone(), pressure_value(entity, step)));
        }
    }
    records
}
