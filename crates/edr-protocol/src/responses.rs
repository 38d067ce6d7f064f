//! Landing page, conformance declaration and exception documents.

use serde::{Deserialize, Serialize};

use crate::conformance;
use crate::types::Link;

/// The document served at the API root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingPage {
    pub title: String,
    pub description: String,
    pub links: Vec<Link>,
}

impl LandingPage {
    /// Links to the root itself, the conformance declaration and the
    /// collection list.
    pub fn new(title: impl Into<String>, description: impl Into<String>, base_url: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            links: vec![
                Link::json(base_url, "self").with_title("This document"),
                Link::json(format!("{}/conformance", base_url), "conformance")
                    .with_title("Conformance classes"),
                Link::json(format!("{}/collections", base_url), "data").with_title("Collections"),
            ],
        }
    }
}

/// Conformance declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConformanceClasses {
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl ConformanceClasses {
    /// Classes this service implements. GeoJSON is declared because the
    /// locations query serves it.
    pub fn current() -> Self {
        Self {
            conforms_to: [
                conformance::CORE,
                conformance::COLLECTIONS,
                conformance::LOCATIONS,
                conformance::COVJSON,
                conformance::GEOJSON,
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.conforms_to.iter().any(|c| c == class)
    }
}

/// The kinds of failure an exception document can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    NotFound,
    InvalidParameter,
    NotAcceptable,
    ServerError,
}

impl ExceptionKind {
    pub fn status(self) -> u16 {
        match self {
            ExceptionKind::NotFound => 404,
            ExceptionKind::InvalidParameter => 400,
            ExceptionKind::NotAcceptable => 406,
            ExceptionKind::ServerError => 500,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ExceptionKind::NotFound => "Not Found",
            ExceptionKind::InvalidParameter => "Bad Request",
            ExceptionKind::NotAcceptable => "Not Acceptable",
            ExceptionKind::ServerError => "Internal Server Error",
        }
    }

    fn type_uri(self) -> &'static str {
        match self {
            ExceptionKind::NotFound => "http://www.opengis.net/def/exceptions/ogcapi-edr-1/1.0/not-found",
            ExceptionKind::InvalidParameter | ExceptionKind::NotAcceptable => {
                "http://www.opengis.net/def/exceptions/ogcapi-edr-1/1.0/invalid-parameter-value"
            }
            ExceptionKind::ServerError => {
                "http://www.opengis.net/def/exceptions/ogcapi-edr-1/1.0/server-error"
            }
        }
    }
}

/// An exception document (RFC 7807 shape).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExceptionResponse {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,

    /// Path of the request that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ExceptionResponse {
    pub fn new(kind: ExceptionKind, detail: impl Into<String>) -> Self {
        Self {
            type_: kind.type_uri().to_string(),
            title: kind.title().to_string(),
            status: kind.status(),
            detail: detail.into(),
            instance: None,
        }
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_page_links() {
        let landing = LandingPage::new(
            "Environmental Data Retrieval server",
            "Regional pressure settings and aerodrome data",
            "http://localhost:8083/edr",
        );

        let rels: Vec<&str> = landing.links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "conformance", "data"]);
        assert_eq!(landing.links[1].href, "http://localhost:8083/edr/conformance");
        assert_eq!(landing.links[2].href, "http://localhost:8083/edr/collections");
        assert!(landing
            .links
            .iter()
            .all(|l| l.type_.as_deref() == Some("application/json")));
    }

    #[test]
    fn test_conformance_current() {
        let conf = ConformanceClasses::current();

        assert_eq!(conf.conforms_to.len(), 5);
        assert!(conf.contains(conformance::LOCATIONS));
        assert!(conf.contains(conformance::GEOJSON));

        let json = serde_json::to_value(&conf).unwrap();
        assert_eq!(json["conformsTo"][0], conformance::CORE);
    }

    #[test]
    fn test_exception_kinds() {
        for (kind, status) in [
            (ExceptionKind::NotFound, 404),
            (ExceptionKind::InvalidParameter, 400),
            (ExceptionKind::NotAcceptable, 406),
            (ExceptionKind::ServerError, 500),
        ] {
            let exc = ExceptionResponse::new(kind, "detail");
            assert_eq!(exc.status, status);
            assert_eq!(exc.title, kind.title());
        }
        assert!(ExceptionResponse::new(ExceptionKind::ServerError, "x")
            .type_
            .ends_with("server-error"));
    }

    #[test]
    fn test_exception_serialization() {
        let exc = ExceptionResponse::new(ExceptionKind::NotFound, "Collection not found: missing")
            .with_instance("/edr/collections/missing");

        let json = serde_json::to_value(&exc).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["title"], "Not Found");
        assert_eq!(json["instance"], "/edr/collections/missing");
        assert!(json["type"].as_str().unwrap().ends_with("not-found"));
    }
}
