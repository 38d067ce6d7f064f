//! Shared test utilities for the EDR workspace.
//!
//! This crate provides common testing infrastructure including:
//! - The fixed regional pressure dataset and small record scenarios
//! - Synthetic record generators
//! - Temporary config directory helpers
//!
//! Records are plain `(entity, timestamp, value)` tuples so this crate does
//! not depend on the protocol crate; convert with `ObservationRecord::from`.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, synthetic_records};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// A record as `(entity, timestamp, value)`.
pub type RecordTuple = (String, String, String);

/// Assert that every line of a CSV body has the same number of fields.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_csv_rectangular;
///
/// assert_csv_rectangular!("a,b,c\n1,2,3\n", 3);
/// ```
#[macro_export]
macro_rules! assert_csv_rectangular {
    ($body:expr, $columns:expr) => {{
        let body: &str = $body;
        let columns: usize = $columns;
        for (i, line) in body.lines().enumerate() {
            let fields = line.split(',').count();
            if fields != columns {
                panic!(
                    "assertion failed: line {} has {} fields, expected {}: `{}`",
                    i, fields, columns, line
                );
            }
        }
    }};
}
