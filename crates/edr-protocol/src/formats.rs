//! Output format registry.
//!
//! Every data query result is encoded in one of a small closed set of
//! formats. Each format has exactly one canonical lowercase token, which is
//! what clients pass in the `f` query parameter. Matching is case-insensitive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::media_types;

/// Output formats a data query can be encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    /// Delimited text, one row per record.
    Csv,
    /// CoverageJSON envelope.
    CoverageJson,
    /// GeoJSON FeatureCollection, one feature per entity.
    GeoJson,
    /// NetCDF4 gridded output. Advertised by the registry only; no encoder.
    NetCdf4,
}

/// Token table: `(format, canonical token, display label)`.
///
/// Both directions of the mapping are derived from this one table.
const FORMATS: [(OutputFormat, &str, &str); 4] = [
    (OutputFormat::Csv, "csv", "CSV"),
    (OutputFormat::CoverageJson, "coveragejson", "CoverageJSON"),
    (OutputFormat::GeoJson, "geojson", "GeoJSON"),
    (OutputFormat::NetCdf4, "netcdf4", "NetCDF4"),
];

impl OutputFormat {
    /// All formats, in registry order.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Csv,
        OutputFormat::CoverageJson,
        OutputFormat::GeoJson,
        OutputFormat::NetCdf4,
    ];

    /// Parse a format token, ignoring ASCII case. The token must match
    /// exactly otherwise; surrounding whitespace is the caller's concern.
    ///
    /// Returns `None` for unknown tokens; the caller picks the fallback.
    pub fn parse(token: &str) -> Option<Self> {
        FORMATS
            .iter()
            .find(|(_, name, _)| name.eq_ignore_ascii_case(token))
            .map(|(format, _, _)| *format)
    }

    /// The canonical lowercase token.
    pub fn name(&self) -> &'static str {
        self.entry().1
    }

    /// Human-facing label used in link metadata (e.g. "GeoJSON").
    pub fn label(&self) -> &'static str {
        self.entry().2
    }

    /// Content-Type of an encoded payload in this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => media_types::CSV,
            OutputFormat::CoverageJson => media_types::COVERAGE_JSON,
            OutputFormat::GeoJson => media_types::GEO_JSON,
            OutputFormat::NetCdf4 => media_types::NETCDF,
        }
    }

    /// Whether an encoder exists for this format.
    pub fn has_encoder(&self) -> bool {
        !matches!(self, OutputFormat::NetCdf4)
    }

    fn entry(&self) -> &'static (OutputFormat, &'static str, &'static str) {
        // The table is total over the enum; the index mirrors declaration order.
        &FORMATS[*self as usize]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a token does not name a known format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output format: '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::parse(s).ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = UnknownFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.name().to_string()
    }
}

/// Join format labels for diagnostics, e.g. `"GeoJSON, CoverageJSON, CSV"`.
pub fn join_labels(formats: &[OutputFormat]) -> String {
    formats
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
