//! Data query handler.
//!
//! Every query type shares one route; the collection's query descriptor
//! decides which formats it may be answered in.

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use edr_protocol::{
    payload,
    responses::{ExceptionKind, ExceptionResponse},
};
use metrics::counter;
use serde::Deserialize;
use std::sync::Arc;

use super::{body_response, edr_error_response, exception_response};
use crate::content_negotiation::check_data_accept;
use crate::state::AppState;

/// Query parameters for data queries.
#[derive(Debug, Default, Deserialize)]
pub struct DataQueryParams {
    /// Output format token (`CSV`, `GeoJSON`, `CoverageJSON`, ...).
    pub f: Option<String>,

    /// Query geometry. Accepted but not used for filtering.
    pub coords: Option<String>,
}

/// GET /edr/collections/:collection_id/:query_type
pub async fn data_query_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, query_type)): Path<(String, String)>,
    Query(params): Query<DataQueryParams>,
    headers: HeaderMap,
) -> Response {
    counter!("edr_requests_total", "endpoint" => "data").increment(1);

    let instance = format!("/edr/collections/{}/{}", collection_id, query_type);

    let (query_type, format) =
        match state
            .catalog
            .resolve_query(&collection_id, &query_type, params.f.as_deref())
        {
            Ok(resolved) => resolved,
            Err(e) => return edr_error_response(&e, &instance),
        };

    if let Err(response) = check_data_accept(&headers, format) {
        tracing::warn!(%format, "Accept header does not match requested format");
        return response;
    }

    let collection = match state.catalog.collection(&collection_id) {
        Ok(collection) => collection,
        Err(e) => return edr_error_response(&e, &instance),
    };

    let records = state.dataset.records(&collection_id);
    let payload = payload::encode(format, records, collection);

    let body = match payload.to_body() {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize data query response");
            return exception_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ExceptionResponse::new(ExceptionKind::ServerError, e.to_string())
                    .with_instance(instance),
            );
        }
    };

    tracing::debug!(
        collection = %collection_id,
        query = %query_type,
        %format,
        coords = params.coords.as_deref().unwrap_or(""),
        records = records.len(),
        "Data query served"
    );

    body_response(StatusCode::OK, payload.media_type(), Some("max-age=300"), body)
}
