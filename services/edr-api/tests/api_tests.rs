//! Integration tests driving the EDR router end to end.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use edr_api::{build_router, state::AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use test_utils::{assert_csv_rectangular, catalog_config_dir, collections, format_tokens, pressure};
use tower::ServiceExt;

const BASE_URL: &str = "http://localhost:8083/edr";

fn app() -> Router {
    let state = AppState::from_config_dir(catalog_config_dir(), BASE_URL).unwrap();
    build_router(Arc::new(state))
}

async fn get(uri: &str) -> Response {
    get_with_accept(uri, None).await
}

async fn get_with_accept(uri: &str, accept: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(accept) = accept {
        request = request.header(header::ACCEPT, accept);
    }
    app()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn content_type(response: &Response) -> &str {
    response.headers()[header::CONTENT_TYPE].to_str().unwrap()
}

fn data_uri(collection: &str, query: &str, f: Option<&str>) -> String {
    match f {
        Some(f) => format!("/edr/collections/{}/{}?f={}", collection, query, f),
        None => format!("/edr/collections/{}/{}", collection, query),
    }
}

// =============================================================================
// METADATA
// =============================================================================

#[tokio::test]
async fn test_landing_page() {
    for uri in ["/edr", "/edr/"] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["title"], "Environmental Data Retrieval server");
        let rels: Vec<&str> = json["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["rel"].as_str().unwrap())
            .collect();
        assert_eq!(rels, vec!["self", "conformance", "data"]);
    }
}

#[tokio::test]
async fn test_conformance() {
    let json = body_json(get("/edr/conformance").await).await;
    assert!(!json["conformsTo"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_collections() {
    let response = get("/edr/collections").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/json");

    let json = body_json(response).await;
    let ids: Vec<&str> = json["collections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            collections::REGIONAL_PRESSURE,
            collections::OPEN_RUNWAY,
            collections::DE_ICING
        ]
    );
}

#[tokio::test]
async fn test_get_collection_advertises_descriptor_formats() {
    let json = body_json(get("/edr/collections/regional-pressure-settings").await).await;

    let locations = &json["data_queries"]["locations"];
    assert_eq!(
        locations["link"]["href"],
        format!("{}/collections/regional-pressure-settings/locations", BASE_URL)
    );
    assert_eq!(
        locations["link"]["variables"]["output_formats"],
        serde_json::json!(["GeoJSON", "CoverageJSON", "CSV"])
    );
    assert_eq!(locations["link"]["variables"]["default_output_format"], "GeoJSON");
    assert!(json["data_queries"]["radius"].is_null());
}

#[tokio::test]
async fn test_collection_without_queries() {
    let json = body_json(get("/edr/collections/open-runway").await).await;
    assert_eq!(json["title"], "Open runway");
    assert!(json["data_queries"].is_null());
}

#[tokio::test]
async fn test_unknown_collection_not_found() {
    let response = get("/edr/collections/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["status"], 404);
    assert_eq!(json["instance"], "/edr/collections/missing");
}

#[tokio::test]
async fn test_metadata_not_acceptable() {
    let response = get_with_accept("/edr/collections", Some("application/xml")).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

// =============================================================================
// DATA QUERIES
// =============================================================================

#[tokio::test]
async fn test_locations_csv() {
    let response = get(&data_uri(
        collections::REGIONAL_PRESSURE,
        "locations",
        Some(format_tokens::CSV),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/csv");

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), pressure::RECORD_COUNT + 1);
    assert_eq!(lines[0], "region,time,qnh");
    assert_csv_rectangular!(&body, 3);
}

#[tokio::test]
async fn test_locations_geojson() {
    let response = get(&data_uri(
        collections::REGIONAL_PRESSURE,
        "locations",
        Some(format_tokens::GEOJSON),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/geo+json");

    let json = body_json(response).await;
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), pressure::REGIONS.len());
    for feature in features {
        assert_eq!(feature["properties"]["pressure"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_locations_default_is_geojson() {
    let response = get(&data_uri(collections::REGIONAL_PRESSURE, "locations", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/geo+json");
}

#[tokio::test]
async fn test_area_coveragejson() {
    let response = get(&data_uri(collections::REGIONAL_PRESSURE, "area", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/vnd.cov+json");

    let json = body_json(response).await;
    assert_eq!(json["type"], "CoverageJSON");
}

#[tokio::test]
async fn test_netcdf4_rejected() {
    let response = get(&data_uri(
        collections::REGIONAL_PRESSURE,
        "locations",
        Some(format_tokens::NETCDF4),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], 400);
    assert!(json["detail"].as_str().unwrap().contains("netcdf4"));
}

#[tokio::test]
async fn test_unknown_format_rejected() {
    let response = get(&data_uri(
        collections::REGIONAL_PRESSURE,
        "locations",
        Some(format_tokens::UNKNOWN),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_not_exposed_rejected() {
    let response = get(&data_uri(collections::OPEN_RUNWAY, "locations", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&data_uri(collections::REGIONAL_PRESSURE, "swath", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_data_query_unknown_collection() {
    let response = get(&data_uri("missing", "locations", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_data_accept_must_match_format() {
    let uri = data_uri(collections::REGIONAL_PRESSURE, "locations", Some("csv"));

    let response = get_with_accept(&uri, Some("application/geo+json")).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

    let response = get_with_accept(&uri, Some("text/csv")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// HEALTH AND METRICS
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let response = get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_metrics_with_handle() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = AppState::from_config_dir(catalog_config_dir(), BASE_URL)
        .unwrap()
        .with_prometheus(handle);

    let response = build_router(Arc::new(state))
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/plain"));
}
