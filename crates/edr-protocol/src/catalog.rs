//! Collection catalogue and output format resolution.
//!
//! The catalogue is the declarative contract of the service: each collection
//! advertises a set of query types, and each query type advertises which
//! output formats it serves and which one it falls back to. The same
//! descriptors drive both the link metadata in `/collections` and the
//! checks applied to incoming data queries, so a format that is not
//! advertised can never be served.
//!
//! Descriptors are built once at startup and only read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::EdrError;
use crate::formats::{join_labels, OutputFormat};
use crate::parameters::Parameter;
use crate::records::FieldNames;
use crate::types::Extent;

/// EDR data query types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Area,
    Corridor,
    Cube,
    Items,
    Locations,
    Position,
    Radius,
    Trajectory,
}

impl QueryType {
    /// All query types.
    pub const ALL: [QueryType; 8] = [
        QueryType::Area,
        QueryType::Corridor,
        QueryType::Cube,
        QueryType::Items,
        QueryType::Locations,
        QueryType::Position,
        QueryType::Radius,
        QueryType::Trajectory,
    ];

    /// Path segment and `query_type` variable value.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Area => "area",
            QueryType::Corridor => "corridor",
            QueryType::Cube => "cube",
            QueryType::Items => "items",
            QueryType::Locations => "locations",
            QueryType::Position => "position",
            QueryType::Radius => "radius",
            QueryType::Trajectory => "trajectory",
        }
    }

    /// Title used for the query link, e.g. "Locations query".
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} query", first.to_ascii_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryType::ALL
            .into_iter()
            .find(|q| q.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Formats served by one query type of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    query_type: QueryType,
    allowed_formats: Vec<OutputFormat>,
    default_format: OutputFormat,
}

impl QueryDescriptor {
    /// Create a descriptor, checking its invariants.
    ///
    /// `allowed_formats` keeps its order (it is the advertised order) and
    /// must be non-empty, free of duplicates, contain `default_format`, and
    /// name only formats that have an encoder.
    pub fn new(
        query_type: QueryType,
        allowed_formats: Vec<OutputFormat>,
        default_format: OutputFormat,
    ) -> Result<Self, EdrError> {
        if allowed_formats.is_empty() {
            return Err(EdrError::InvalidDescriptor(format!(
                "{} query advertises no output formats",
                query_type
            )));
        }

        for (i, format) in allowed_formats.iter().enumerate() {
            if allowed_formats[..i].contains(format) {
                return Err(EdrError::InvalidDescriptor(format!(
                    "{} query lists {} twice",
                    query_type,
                    format.label()
                )));
            }
            if !format.has_encoder() {
                return Err(EdrError::InvalidDescriptor(format!(
                    "{} query advertises {} but no encoder exists for it",
                    query_type,
                    format.label()
                )));
            }
        }

        if !allowed_formats.contains(&default_format) {
            return Err(EdrError::InvalidDescriptor(format!(
                "{} query default format {} is not one of: {}",
                query_type,
                default_format.label(),
                join_labels(&allowed_formats)
            )));
        }

        Ok(Self {
            query_type,
            allowed_formats,
            default_format,
        })
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    pub fn allowed_formats(&self) -> &[OutputFormat] {
        &self.allowed_formats
    }

    pub fn default_format(&self) -> OutputFormat {
        self.default_format
    }

    pub fn allows(&self, format: OutputFormat) -> bool {
        self.allowed_formats.contains(&format)
    }

    /// Resolve a requested format token against this query.
    ///
    /// An absent or blank token selects the default format.
    pub fn resolve(&self, requested: Option<&str>) -> Result<OutputFormat, EdrError> {
        let token = match requested.map(str::trim) {
            None | Some("") => return Ok(self.default_format),
            Some(token) => token,
        };

        match OutputFormat::parse(token) {
            Some(format) if self.allows(format) => Ok(format),
            _ => Err(EdrError::UnsupportedFormat {
                requested: token.to_string(),
                allowed: join_labels(&self.allowed_formats),
            }),
        }
    }
}

/// A collection: its metadata and the queries it exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDescriptor {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub extent: Extent,
    pub crs: String,

    /// The measured field served by data queries.
    pub parameter: Parameter,

    /// CSV header names.
    pub columns: FieldNames,

    /// GeoJSON property keys.
    pub properties: FieldNames,

    queries: BTreeMap<QueryType, QueryDescriptor>,
}

impl CollectionDescriptor {
    /// Create a collection with no queries.
    pub fn new(id: impl Into<String>, parameter: Parameter) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            extent: Extent::new([-180.0, -90.0, 180.0, 90.0], "CRS:84"),
            crs: "EPSG:4326".to_string(),
            parameter,
            columns: FieldNames::default(),
            properties: FieldNames::default(),
            queries: BTreeMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = crs.into();
        self
    }

    pub fn with_columns(mut self, columns: FieldNames) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_properties(mut self, properties: FieldNames) -> Self {
        self.properties = properties;
        self
    }

    /// Expose a query. A later descriptor for the same type replaces the earlier.
    pub fn with_query(mut self, query: QueryDescriptor) -> Self {
        self.queries.insert(query.query_type(), query);
        self
    }

    /// Descriptor for one query type.
    pub fn query(&self, query_type: QueryType) -> Option<&QueryDescriptor> {
        self.queries.get(&query_type)
    }

    /// Exposed queries, ordered by query type.
    pub fn queries(&self) -> impl Iterator<Item = &QueryDescriptor> {
        self.queries.values()
    }

    /// Union of the formats of all exposed queries, first-advertised first.
    pub fn output_formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::new();
        for query in self.queries.values() {
            for format in query.allowed_formats() {
                if !formats.contains(format) {
                    formats.push(*format);
                }
            }
        }
        formats
    }
}

/// The set of collections served by the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    collections: Vec<CollectionDescriptor>,
}

impl Catalog {
    /// Create a catalogue.
    ///
    /// Collection ids must be unique, and each collection's CSV columns and
    /// GeoJSON property keys must be distinct names.
    pub fn new(collections: Vec<CollectionDescriptor>) -> Result<Self, EdrError> {
        for (i, collection) in collections.iter().enumerate() {
            if collections[..i].iter().any(|c| c.id == collection.id) {
                return Err(EdrError::InvalidDescriptor(format!(
                    "duplicate collection id '{}'",
                    collection.id
                )));
            }
            for names in [&collection.columns, &collection.properties] {
                if let Err(EdrError::InvalidDescriptor(reason)) = names.validate() {
                    return Err(EdrError::InvalidDescriptor(format!(
                        "collection '{}': {}",
                        collection.id, reason
                    )));
                }
            }
        }
        Ok(Self { collections })
    }

    /// Look up a collection by id.
    pub fn get(&self, id: &str) -> Option<&CollectionDescriptor> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// All collections, in catalogue order.
    pub fn collections(&self) -> &[CollectionDescriptor] {
        &self.collections
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Look up a collection, or fail with `UnknownCollection`.
    pub fn collection(&self, id: &str) -> Result<&CollectionDescriptor, EdrError> {
        self.get(id)
            .ok_or_else(|| EdrError::UnknownCollection(id.to_string()))
    }

    /// Resolve the output format for a data query.
    ///
    /// Checks, in order: the collection exists, it exposes `query_type`,
    /// and the requested format (or the default when absent) is allowed.
    pub fn resolve(
        &self,
        collection_id: &str,
        query_type: QueryType,
        requested: Option<&str>,
    ) -> Result<OutputFormat, EdrError> {
        let collection = self.collection(collection_id)?;
        let query = collection
            .query(query_type)
            .ok_or_else(|| EdrError::UnsupportedQuery {
                collection: collection_id.to_string(),
                query: query_type.to_string(),
            })?;
        query.resolve(requested)
    }

    /// Like [`Catalog::resolve`], taking the query type as a raw path segment.
    ///
    /// Unknown query type tokens are reported as `UnsupportedQuery`, after
    /// the collection itself has been checked.
    pub fn resolve_query(
        &self,
        collection_id: &str,
        query_token: &str,
        requested: Option<&str>,
    ) -> Result<(QueryType, OutputFormat), EdrError> {
        self.collection(collection_id)?;
        let query_type: QueryType =
            query_token
                .parse()
                .map_err(|query: String| EdrError::UnsupportedQuery {
                    collection: collection_id.to_string(),
                    query,
                })?;
        let format = self.resolve(collection_id, query_type, requested)?;
        Ok((query_type, format))
    }
}
