//! Collections endpoint handlers.

use axum::{
    extract::{Extension, Path},
    http::HeaderMap,
    response::Response,
};
use edr_protocol::{Collection, CollectionList};
use metrics::counter;
use std::sync::Arc;

use super::{edr_error_response, json_response};
use crate::content_negotiation::check_metadata_accept;
use crate::state::AppState;

/// GET /edr/collections - List all collections
pub async fn list_collections_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    counter!("edr_requests_total", "endpoint" => "collections").increment(1);

    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    let collections = state
        .catalog
        .collections()
        .iter()
        .map(|descriptor| Collection::from_descriptor(descriptor, &state.base_url))
        .collect();

    json_response(&CollectionList::new(collections, &state.base_url), "max-age=60")
}

/// GET /edr/collections/:collection_id - Get collection metadata
pub async fn get_collection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    counter!("edr_requests_total", "endpoint" => "collection").increment(1);

    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    match state.catalog.collection(&collection_id) {
        Ok(descriptor) => {
            tracing::debug!(collection = %collection_id, "Serving collection metadata");
            json_response(
                &Collection::from_descriptor(descriptor, &state.base_url),
                "max-age=60",
            )
        }
        Err(e) => edr_error_response(&e, &format!("/edr/collections/{}", collection_id)),
    }
}
