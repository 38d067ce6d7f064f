//! Dispatch from a resolved output format to its encoder.

use crate::catalog::CollectionDescriptor;
use crate::coverage_json::CoverageJson;
use crate::formats::OutputFormat;
use crate::geojson::FeatureCollection;
use crate::records::{GroupedSeries, ObservationRecord};
use crate::tabular::TabularRows;

/// An encoded data query result, tagged by encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedPayload {
    TabularRows(TabularRows),
    FeatureSet(FeatureCollection),
    CoverageEnvelope(CoverageJson),
}

impl EncodedPayload {
    /// The format this payload was encoded as.
    pub fn format(&self) -> OutputFormat {
        match self {
            EncodedPayload::TabularRows(_) => OutputFormat::Csv,
            EncodedPayload::FeatureSet(_) => OutputFormat::GeoJson,
            EncodedPayload::CoverageEnvelope(_) => OutputFormat::CoverageJson,
        }
    }

    /// Content-Type for the response body.
    pub fn media_type(&self) -> &'static str {
        self.format().media_type()
    }

    /// Serialize to the response body.
    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            EncodedPayload::TabularRows(rows) => Ok(rows.to_csv().into_bytes()),
            EncodedPayload::FeatureSet(features) => serde_json::to_vec(features),
            EncodedPayload::CoverageEnvelope(coverage) => serde_json::to_vec(coverage),
        }
    }
}

/// Encode records as `format`.
///
/// CSV is written from the raw records. GeoJSON and CoverageJSON both go
/// through [`GroupedSeries::group`], although the coverage envelope does not
/// read the series yet. `format` must be one that a
/// [`QueryDescriptor`](crate::catalog::QueryDescriptor) can allow.
pub fn encode(
    format: OutputFormat,
    records: &[ObservationRecord],
    collection: &CollectionDescriptor,
) -> EncodedPayload {
    match format {
        OutputFormat::Csv => {
            EncodedPayload::TabularRows(TabularRows::encode(records, &collection.columns))
        }
        OutputFormat::GeoJson => {
            let grouped = GroupedSeries::group(records);
            EncodedPayload::FeatureSet(FeatureCollection::encode(
                &grouped,
                &collection.properties,
            ))
        }
        OutputFormat::CoverageJson => {
            let grouped = GroupedSeries::group(records);
            EncodedPayload::CoverageEnvelope(CoverageJson::encode(
                &grouped,
                &collection.parameter,
            ))
        }
        OutputFormat::NetCdf4 => {
            unreachable!("query descriptors never allow formats without an encoder")
        }
    }
}
