//! EDR Collection types.
//!
//! Collections are the served view of a [`CollectionDescriptor`]: the same
//! query and format declarations, rendered as HATEOAS links with their
//! query variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::{CollectionDescriptor, QueryDescriptor, QueryType};
use crate::formats::OutputFormat;
use crate::parameters::Parameter;
use crate::types::{Extent, Link};

/// WKT for the geographic CRS advertised in `crs_details`.
const WGS84_WKT: &str = "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563]],PRIMEM[\"Greenwich\",0],UNIT[\"degree\",0.0174532925199433]]";

const DISTANCE_UNITS: [&str; 4] = ["km", "m", "mi", "nm"];
const HEIGHT_UNITS: [&str; 4] = ["m", "km", "hPa", "mb"];

/// A list of collections available from the EDR API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionList {
    /// Links to related resources.
    pub links: Vec<Link>,

    /// The collections.
    pub collections: Vec<Collection>,
}

impl CollectionList {
    pub fn new(collections: Vec<Collection>, base_url: &str) -> Self {
        Self {
            links: vec![
                Link::json(format!("{}/collections", base_url), "self"),
                Link::json(base_url, "root"),
            ],
            collections,
        }
    }
}

/// One served collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub links: Vec<Link>,

    pub extent: Extent,

    /// Absent when the collection exposes no query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_queries: Option<DataQueries>,

    pub crs: Vec<String>,

    /// Union of every query's format labels, first-seen order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub output_formats: Vec<String>,

    /// The collection's single parameter, keyed by its code.
    pub parameter_names: HashMap<String, Parameter>,
}

impl Collection {
    /// Render a catalogue entry.
    ///
    /// Every query the descriptor exposes gets a link under `data_queries`
    /// advertising exactly the descriptor's formats and default.
    pub fn from_descriptor(descriptor: &CollectionDescriptor, base_url: &str) -> Self {
        let collection_url = format!("{}/collections/{}", base_url, descriptor.id);

        let mut queries = DataQueries::default();
        for query in descriptor.queries() {
            queries.set(
                query.query_type(),
                QueryDescription::for_query(base_url, descriptor, query),
            );
        }

        Self {
            id: descriptor.id.clone(),
            title: descriptor.title.clone(),
            description: descriptor.description.clone(),
            links: vec![Link::json(collection_url, "self"), Link::json(base_url, "root")],
            extent: descriptor.extent.clone(),
            data_queries: (!queries.is_empty()).then_some(queries),
            crs: vec![descriptor.crs.clone()],
            output_formats: descriptor
                .output_formats()
                .iter()
                .map(|f| f.label().to_string())
                .collect(),
            parameter_names: HashMap::from([(
                descriptor.parameter.code().to_string(),
                descriptor.parameter.clone(),
            )]),
        }
    }
}

/// Supported data query types for a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DataQueries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<QueryDescription>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub corridor: Option<QueryDescription>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cube: Option<QueryDescription>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<QueryDescription>,

    /// Locations query (named locations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<QueryDescription>,

    /// Position query (point sampling).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<QueryDescription>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<QueryDescription>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<QueryDescription>,
}

impl DataQueries {
    fn slot(&mut self, query_type: QueryType) -> &mut Option<QueryDescription> {
        match query_type {
            QueryType::Area => &mut self.area,
            QueryType::Corridor => &mut self.corridor,
            QueryType::Cube => &mut self.cube,
            QueryType::Items => &mut self.items,
            QueryType::Locations => &mut self.locations,
            QueryType::Position => &mut self.position,
            QueryType::Radius => &mut self.radius,
            QueryType::Trajectory => &mut self.trajectory,
        }
    }

    /// Set the description for one query type.
    pub fn set(&mut self, query_type: QueryType, description: QueryDescription) {
        *self.slot(query_type) = Some(description);
    }

    /// Description for one query type.
    pub fn get(&self, query_type: QueryType) -> Option<&QueryDescription> {
        match query_type {
            QueryType::Area => self.area.as_ref(),
            QueryType::Corridor => self.corridor.as_ref(),
            QueryType::Cube => self.cube.as_ref(),
            QueryType::Items => self.items.as_ref(),
            QueryType::Locations => self.locations.as_ref(),
            QueryType::Position => self.position.as_ref(),
            QueryType::Radius => self.radius.as_ref(),
            QueryType::Trajectory => self.trajectory.as_ref(),
        }
    }

    /// True if no query is advertised.
    pub fn is_empty(&self) -> bool {
        QueryType::ALL.iter().all(|q| self.get(*q).is_none())
    }
}

/// One entry of `data_queries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryDescription {
    pub link: QueryLink,
}

/// Templated link to a query endpoint: clients complete it with the
/// parameters its `variables` describe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryLink {
    #[serde(flatten)]
    pub link: Link,

    pub templated: bool,

    pub variables: QueryVariables,
}

impl QueryDescription {
    /// Link and variables for one exposed query.
    ///
    /// The link's media type is that of the default format.
    pub fn for_query(
        base_url: &str,
        collection: &CollectionDescriptor,
        query: &QueryDescriptor,
    ) -> Self {
        let query_type = query.query_type();
        let default = query.default_format();

        let link = Link::new(
            format!(
                "{}/collections/{}/{}",
                base_url,
                collection.id,
                query_type.as_str()
            ),
            "data",
        )
        .with_type(default.media_type())
        .with_title(query_type.title());

        let mut variables = QueryVariables {
            title: query_type.title(),
            query_type: query_type.as_str().to_string(),
            coords: coords_convention(query_type).map(str::to_string),
            output_formats: query
                .allowed_formats()
                .iter()
                .map(|f| f.label().to_string())
                .collect(),
            default_output_format: default.label().to_string(),
            crs_details: vec![CrsDetails {
                crs: collection.crs.clone(),
                wkt: WGS84_WKT.to_string(),
            }],
            within_units: None,
            width_units: None,
            height_units: None,
        };

        match query_type {
            QueryType::Corridor => {
                variables.width_units = Some(units(&DISTANCE_UNITS));
                variables.height_units = Some(units(&HEIGHT_UNITS));
            }
            QueryType::Radius => {
                variables.within_units = Some(units(&DISTANCE_UNITS));
            }
            _ => {}
        }

        Self {
            link: QueryLink {
                link,
                templated: true,
                variables,
            },
        }
    }

    /// Advertised formats parsed back from the variables.
    pub fn advertised_formats(&self) -> Vec<OutputFormat> {
        self.link
            .variables
            .output_formats
            .iter()
            .filter_map(|l| OutputFormat::parse(l))
            .collect()
    }
}

fn units(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

/// How the `coords` parameter is expressed for each query type.
fn coords_convention(query_type: QueryType) -> Option<&'static str> {
    match query_type {
        QueryType::Position => Some("Well Known Text POINT value i.e. POINT(24.9384 60.1699)"),
        QueryType::Area => Some("Well Known Text POLYGON value"),
        QueryType::Radius => Some("Well Known Text POINT value with a within distance"),
        QueryType::Trajectory | QueryType::Corridor => {
            Some("Well Known Text LINESTRING value")
        }
        QueryType::Cube => Some("bbox=minx,miny,maxx,maxy"),
        QueryType::Locations | QueryType::Items => None,
    }
}

/// Settings of one query type, as advertised to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryVariables {
    pub title: String,

    pub query_type: String,

    /// How coordinates are passed to the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_units: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_units: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_units: Option<Vec<String>>,

    /// Output format labels, in advertised order.
    pub output_formats: Vec<String>,

    pub default_output_format: String,

    pub crs_details: Vec<CrsDetails>,
}

/// A CRS identifier with its WKT definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrsDetails {
    pub crs: String,
    pub wkt: String,
}
