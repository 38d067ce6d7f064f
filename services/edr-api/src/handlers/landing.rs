//! Landing page handler.

use axum::{extract::Extension, http::HeaderMap, response::Response};
use edr_protocol::LandingPage;
use metrics::counter;
use std::sync::Arc;

use super::json_response;
use crate::content_negotiation::check_metadata_accept;
use crate::state::AppState;

pub const TITLE: &str = "Environmental Data Retrieval server";

/// GET /edr - Landing page
pub async fn landing_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    counter!("edr_requests_total", "endpoint" => "landing").increment(1);

    // Check Accept header - return 406 if unsupported format requested
    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    let landing = LandingPage::new(
        TITLE,
        "OGC API - Environmental Data Retrieval for regional pressure settings and aerodrome data",
        &state.base_url,
    );

    json_response(&landing, "max-age=300")
}
