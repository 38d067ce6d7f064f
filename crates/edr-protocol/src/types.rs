//! Links and extents shared by the metadata documents.

use serde::{Deserialize, Serialize};

/// Temporal reference system of every interval this service publishes.
pub const GREGORIAN_TRS: &str =
    "TIMECRS[\"DateTime\",TDATUM[\"Gregorian Calendar\"],CS[TemporalDateTime,1],AXIS[\"Time (T)\",future]]";

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub href: String,

    /// Relation: "self", "root", "data", "conformance".
    pub rel: String,

    /// Media type of the target.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
        }
    }

    /// A link to a JSON document.
    pub fn json(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self::new(href, rel).with_type("application/json")
    }

    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Where and when a collection has data.
///
/// Every collection has a bounding box; the time interval is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    pub spatial: SpatialExtent,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalExtent>,
}

impl Extent {
    /// A single bounding box, in the axis order of `crs`.
    pub fn new(bbox: [f64; 4], crs: impl Into<String>) -> Self {
        Self {
            spatial: SpatialExtent {
                bbox: vec![bbox],
                crs: crs.into(),
            },
            temporal: None,
        }
    }

    /// Add a time interval. `None` leaves that end open.
    pub fn with_interval(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.temporal = Some(TemporalExtent {
            interval: vec![[start, end]],
            trs: GREGORIAN_TRS.to_string(),
        });
        self
    }
}

/// Bounding boxes and their CRS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    pub bbox: Vec<[f64; 4]>,
    pub crs: String,
}

/// `[start, end]` intervals (ISO 8601); null ends are open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    pub interval: Vec<[Option<String>; 2]>,
    pub trs: String,
}
