//! EDR catalogue configuration loading and types.

use anyhow::{Context, Result};
use edr_protocol::{
    Catalog, CollectionDescriptor, Extent, FieldNames, OutputFormat, Parameter,
    QueryDescriptor, QueryType, Unit,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// EDR configuration loaded from YAML files.
#[derive(Debug, Clone, PartialEq)]
pub struct EdrConfig {
    /// Collection definitions, in load order.
    pub collections: Vec<CollectionDefinition>,
}

impl EdrConfig {
    /// Load configuration from a directory of YAML files.
    ///
    /// Files are read in name order and their collections concatenated.
    /// A missing directory yields the built-in catalogue.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref();

        // If directory doesn't exist, return default config
        if !path.exists() {
            tracing::warn!(
                "EDR config directory {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {}", path.display()))?
        {
            let file_path = entry?.path();
            if let Some(ext) = file_path.extension() {
                if ext == "yaml" || ext == "yml" {
                    files.push(file_path);
                }
            }
        }
        files.sort();

        let mut collections = Vec::new();
        for file_path in files {
            let content = std::fs::read_to_string(&file_path)
                .with_context(|| format!("Failed to read: {:?}", file_path))?;

            let file: CatalogFile = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse: {:?}", file_path))?;

            tracing::info!(
                "Loaded {} EDR collections from {:?}",
                file.collections.len(),
                file_path
            );
            collections.extend(file.collections);
        }

        Ok(Self { collections })
    }

    /// Build the immutable catalogue, checking every descriptor invariant.
    pub fn to_catalog(&self) -> Result<Catalog> {
        let descriptors = self
            .collections
            .iter()
            .map(|c| {
                c.to_descriptor()
                    .with_context(|| format!("Invalid collection '{}'", c.id))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Catalog::new(descriptors)?)
    }
}

impl Default for EdrConfig {
    /// The built-in catalogue: regional pressure settings plus two
    /// collections that expose no queries yet.
    fn default() -> Self {
        let regional = CollectionDefinition {
            id: "regional-pressure-settings".to_string(),
            title: "Regional pressure settings".to_string(),
            description: "QNH per altimeter setting region".to_string(),
            crs: default_crs(),
            bbox: default_bbox(),
            temporal: Some(TemporalDefinition {
                start: Some("2025-07-20T00:00:00Z".to_string()),
                end: Some("2025-07-20T01:00:00Z".to_string()),
            }),
            parameter: ParameterDefinition::default(),
            columns: FieldNames::new("region", "time", "qnh"),
            properties: FieldNames::new("region", "time", "pressure"),
            queries: BTreeMap::from([
                (
                    QueryType::Area,
                    QueryDefinition {
                        output_formats: vec![OutputFormat::CoverageJson],
                        default_output_format: OutputFormat::CoverageJson,
                    },
                ),
                (
                    QueryType::Position,
                    QueryDefinition {
                        output_formats: vec![OutputFormat::CoverageJson],
                        default_output_format: OutputFormat::CoverageJson,
                    },
                ),
                (
                    QueryType::Locations,
                    QueryDefinition {
                        output_formats: vec![
                            OutputFormat::GeoJson,
                            OutputFormat::CoverageJson,
                            OutputFormat::Csv,
                        ],
                        default_output_format: OutputFormat::GeoJson,
                    },
                ),
            ]),
        };

        Self {
            collections: vec![
                regional,
                CollectionDefinition::bare("open-runway", "Open runway"),
                CollectionDefinition::bare("de-icing", "De-icing"),
            ],
        }
    }
}

/// One YAML catalogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub collections: Vec<CollectionDefinition>,
}

/// Definition of an EDR collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDefinition {
    /// Unique collection identifier.
    pub id: String,

    /// Human-readable title.
    #[serde(default)]
    pub title: String,

    /// Description of the collection.
    #[serde(default)]
    pub description: String,

    /// CRS of the bbox and of query coordinates.
    #[serde(default = "default_crs")]
    pub crs: String,

    /// Bounding box, in the axis order of `crs`.
    #[serde(default = "default_bbox")]
    pub bbox: [f64; 4],

    #[serde(default)]
    pub temporal: Option<TemporalDefinition>,

    /// The measured field.
    #[serde(default)]
    pub parameter: ParameterDefinition,

    /// CSV header names.
    #[serde(default)]
    pub columns: FieldNames,

    /// GeoJSON property keys.
    #[serde(default)]
    pub properties: FieldNames,

    /// Exposed queries by type.
    #[serde(default)]
    pub queries: BTreeMap<QueryType, QueryDefinition>,
}

impl CollectionDefinition {
    fn bare(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            crs: default_crs(),
            bbox: default_bbox(),
            temporal: None,
            parameter: ParameterDefinition::default(),
            columns: FieldNames::default(),
            properties: FieldNames::default(),
            queries: BTreeMap::new(),
        }
    }

    /// Convert to a descriptor, validating each query.
    pub fn to_descriptor(&self) -> Result<CollectionDescriptor> {
        let mut extent = Extent::new(self.bbox, self.crs.clone());
        if let Some(temporal) = &self.temporal {
            extent = extent.with_interval(temporal.start.clone(), temporal.end.clone());
        }

        let mut descriptor = CollectionDescriptor::new(&self.id, self.parameter.to_parameter())
            .with_crs(&self.crs)
            .with_extent(extent)
            .with_columns(self.columns.clone())
            .with_properties(self.properties.clone());

        if !self.title.is_empty() {
            descriptor = descriptor.with_title(&self.title);
        }
        if !self.description.is_empty() {
            descriptor = descriptor.with_description(&self.description);
        }

        for (query_type, query) in &self.queries {
            let query = QueryDescriptor::new(
                *query_type,
                query.output_formats.clone(),
                query.default_output_format,
            )?;
            descriptor = descriptor.with_query(query);
        }

        Ok(descriptor)
    }
}

/// Temporal interval bounds (ISO 8601); `None` is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalDefinition {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Parameter definition for a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Parameter code (e.g., "QNH").
    pub id: String,

    /// Human-readable label, also the observed property label.
    pub label: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Unit symbol (e.g., "hPa").
    #[serde(default)]
    pub unit: Option<String>,
}

impl ParameterDefinition {
    pub fn to_parameter(&self) -> Parameter {
        let mut parameter = Parameter::new(&self.id, &self.label);
        if let Some(description) = &self.description {
            parameter = parameter.with_description(description);
        }
        if let Some(unit) = &self.unit {
            parameter = parameter.with_unit(Unit::new(unit, unit));
        }
        parameter
    }
}

impl Default for ParameterDefinition {
    fn default() -> Self {
        Self {
            id: "QNH".to_string(),
            label: "Atmospheric pressure".to_string(),
            description: Some("Atmospheric pressure".to_string()),
            unit: Some("hPa".to_string()),
        }
    }
}

/// Formats for one exposed query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDefinition {
    /// Allowed formats, in advertised order. Tokens or labels.
    pub output_formats: Vec<OutputFormat>,

    pub default_output_format: OutputFormat,
}

fn default_crs() -> String {
    "EPSG:4326".to_string()
}

fn default_bbox() -> [f64; 4] {
    // EPSG:4326 axis order: lat, lon
    [-90.0, -180.0, 90.0, 180.0]
}
