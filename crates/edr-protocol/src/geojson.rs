//! GeoJSON output for data queries.
//!
//! Each entity becomes one Feature carrying its full time and value series
//! as properties. Real per-entity geometry is not available, so every
//! feature gets the same placeholder polygon.
//!
//! See: <https://www.opengis.net/spec/ogcapi-edr-1/1.1/req/edr-geojson>

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::records::{FieldNames, GroupedSeries};

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Array of features.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Build one feature per entity, ordered by entity id.
    ///
    /// An empty grouping yields an empty collection.
    pub fn encode(grouped: &GroupedSeries, keys: &FieldNames) -> Self {
        let features = grouped
            .sorted()
            .into_iter()
            .map(|(entity_id, series)| {
                let properties = IndexMap::from([
                    (keys.entity.clone(), PropertyValue::Text(entity_id.to_string())),
                    (keys.value.clone(), PropertyValue::Series(series.values.clone())),
                    (keys.time.clone(), PropertyValue::Series(series.timestamps.clone())),
                ]);
                Feature::new(Geometry::placeholder(), properties)
            })
            .collect();

        Self {
            type_: "FeatureCollection".to_string(),
            features,
        }
    }
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// The geometry of this feature.
    pub geometry: Geometry,

    /// Feature properties, in insertion order.
    pub properties: IndexMap<String, PropertyValue>,
}

impl Feature {
    /// Create a feature.
    pub fn new(geometry: Geometry, properties: IndexMap<String, PropertyValue>) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry,
            properties,
        }
    }

    /// Look up a string property.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.properties.get(key)? {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Series(_) => None,
        }
    }

    /// Look up a sequence property.
    pub fn series(&self, key: &str) -> Option<&[String]> {
        match self.properties.get(key)? {
            PropertyValue::Series(v) => Some(v),
            PropertyValue::Text(_) => None,
        }
    }
}

/// A property value: a single string or a sequence of strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Series(Vec<String>),
}

/// Feature geometry. Only polygons are produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        /// Linear rings, the first exterior. Each ring is closed.
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

impl Geometry {
    /// Unit square used until entities carry real boundaries.
    pub fn placeholder() -> Self {
        Geometry::Polygon {
            coordinates: vec![vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [0.0, 0.0],
            ]],
        }
    }
}
