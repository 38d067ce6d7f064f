//! OGC API - Environmental Data Retrieval (EDR) Protocol
//!
//! This crate provides the types behind a small EDR server: a catalogue of
//! collections declaring which query types and output formats they serve,
//! and encoders turning observation records into CSV, GeoJSON or
//! CoverageJSON.
//!
//! # Conformance Classes
//!
//! This implementation targets the following conformance classes:
//! - Core
//! - Collections
//! - Locations
//! - CoverageJSON
//! - GeoJSON
//!
//! # Example
//!
//! ```rust
//! use edr_protocol::{
//!     payload, Catalog, CollectionDescriptor, ObservationRecord, OutputFormat, Parameter,
//!     QueryDescriptor, QueryType,
//! };
//!
//! let locations = QueryDescriptor::new(
//!     QueryType::Locations,
//!     vec![OutputFormat::GeoJson, OutputFormat::Csv],
//!     OutputFormat::GeoJson,
//! )
//! .unwrap();
//! let catalog = Catalog::new(vec![CollectionDescriptor::new(
//!     "regional-pressure-settings",
//!     Parameter::new("QNH", "Atmospheric pressure"),
//! )
//! .with_query(locations)])
//! .unwrap();
//!
//! let format = catalog
//!     .resolve("regional-pressure-settings", QueryType::Locations, Some("csv"))
//!     .unwrap();
//! let collection = catalog.get("regional-pressure-settings").unwrap();
//! let records = vec![ObservationRecord::new("01", "20250720T0000Z", "1000")];
//! let body = payload::encode(format, &records, collection).to_body().unwrap();
//! assert_eq!(body, b"entity,time,value\n01,20250720T0000Z,1000\n");
//! ```

pub mod types;
pub mod formats;
pub mod records;
pub mod tabular;
pub mod geojson;
pub mod coverage_json;
pub mod parameters;
pub mod catalog;
pub mod collections;
pub mod payload;
pub mod responses;
pub mod errors;

// Re-export commonly used types
pub use types::{Link, Extent, SpatialExtent, TemporalExtent};
pub use formats::OutputFormat;
pub use records::{FieldNames, GroupedSeries, ObservationRecord, Series};
pub use tabular::TabularRows;
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use coverage_json::{CoverageJson, Domain, DomainType, Axis, NdArray};
pub use parameters::{LocalizedText, ObservedProperty, Parameter, Unit};
pub use catalog::{Catalog, CollectionDescriptor, QueryDescriptor, QueryType};
pub use collections::{Collection, CollectionList, DataQueries, QueryDescription, QueryLink, QueryVariables};
pub use payload::EncodedPayload;
pub use responses::{ConformanceClasses, ExceptionKind, ExceptionResponse, LandingPage};
pub use errors::EdrError;

/// EDR API conformance class URIs
pub mod conformance {
    /// Core conformance class
    pub const CORE: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/core";
    /// Collections conformance class
    pub const COLLECTIONS: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/collections";
    /// Locations query conformance class
    pub const LOCATIONS: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/locations";
    /// CoverageJSON conformance class
    pub const COVJSON: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/covjson";
    /// GeoJSON conformance class
    pub const GEOJSON: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/geojson";
}

/// Media types used in EDR responses
pub mod media_types {
    /// CoverageJSON media type
    pub const COVERAGE_JSON: &str = "application/vnd.cov+json";
    /// GeoJSON media type
    pub const GEO_JSON: &str = "application/geo+json";
    /// JSON media type
    pub const JSON: &str = "application/json";
    /// CSV media type
    pub const CSV: &str = "text/csv";
    /// NetCDF4 media type
    pub const NETCDF: &str = "application/x-netcdf4";
}
