//! Conformance endpoint handler.

use axum::{http::HeaderMap, response::Response};
use edr_protocol::ConformanceClasses;
use metrics::counter;

use super::json_response;
use crate::content_negotiation::check_metadata_accept;

/// GET /edr/conformance - Conformance classes
pub async fn conformance_handler(headers: HeaderMap) -> Response {
    counter!("edr_requests_total", "endpoint" => "conformance").increment(1);

    // Check Accept header - return 406 if unsupported format requested
    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    json_response(&ConformanceClasses::current(), "max-age=3600")
}
