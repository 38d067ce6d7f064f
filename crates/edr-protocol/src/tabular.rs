//! CSV output for data queries.
//!
//! Records are written ungrouped, one row each, in input order, under a
//! fixed three-column header.

use crate::records::{FieldNames, ObservationRecord};

/// Delimited rows: a header followed by one row per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRows {
    rows: Vec<[String; 3]>,
}

impl TabularRows {
    /// Encode records under the given column names.
    pub fn encode(records: &[ObservationRecord], columns: &FieldNames) -> Self {
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push([
            columns.entity.clone(),
            columns.time.clone(),
            columns.value.clone(),
        ]);
        rows.extend(
            records
                .iter()
                .map(|r| [r.entity_id.clone(), r.timestamp.clone(), r.value.clone()]),
        );
        Self { rows }
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[[String; 3]] {
        &self.rows
    }

    /// The header row.
    pub fn header(&self) -> &[String; 3] {
        &self.rows[0]
    }

    /// Row count including the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: the header row is always present.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as CSV text with `\n` line endings.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            for (i, field) in row.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_field(&mut out, field);
            }
            out.push('\n');
        }
        out
    }
}

/// Quote a field if it contains a delimiter, quote or line break.
fn write_field(out: &mut String, field: &str) {
    let needs_quotes = field.contains(&[',', '"', '\n', '\r'][..]);
    if !needs_quotes {
        out.push_str(field);
        return;
    }
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}
