//! Content negotiation utilities for Accept header handling.
//!
//! The `f` query parameter selects the output format of a data query; the
//! Accept header only has to be compatible with it. Metadata documents are
//! always JSON. An incompatible Accept header gets 406 Not Acceptable.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use edr_protocol::{
    media_types,
    responses::{ExceptionKind, ExceptionResponse},
    OutputFormat,
};

use crate::handlers::exception_response;

/// Supported media types for metadata queries (collections, landing, etc.)
pub const METADATA_MEDIA_TYPES: &[&str] = &[media_types::JSON];

/// Check if the Accept header is compatible with the supported media types.
/// Returns Ok(()) if compatible, or an error Response if not.
pub fn check_accept_header(headers: &HeaderMap, supported_types: &[&str]) -> Result<(), Response> {
    // Get Accept header, default to */* if not present
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");

    // Each type can have parameters like "application/json;q=0.9"
    let accepted_types: Vec<&str> = accept
        .split(',')
        .map(|s| s.split(';').next().unwrap_or("").trim())
        .filter(|s| !s.is_empty())
        .collect();

    if accepted_types.is_empty() {
        return Ok(());
    }

    for accepted in &accepted_types {
        if *accepted == "*/*" {
            return Ok(());
        }

        // type/* wildcards, e.g. "text/*"
        if let Some(prefix) = accepted.strip_suffix('*') {
            if supported_types.iter().any(|s| s.starts_with(prefix)) {
                return Ok(());
            }
            continue;
        }

        if supported_types.iter().any(|s| s.eq_ignore_ascii_case(accepted)) {
            return Ok(());
        }
    }

    Err(not_acceptable_response(&accepted_types, supported_types))
}

/// Media types a client may accept for a data query encoded as `format`.
///
/// JSON encodings are also served to clients asking for plain JSON.
pub fn data_media_types(format: OutputFormat) -> Vec<&'static str> {
    match format {
        OutputFormat::CoverageJson | OutputFormat::GeoJson => {
            vec![format.media_type(), media_types::JSON]
        }
        OutputFormat::Csv | OutputFormat::NetCdf4 => vec![format.media_type()],
    }
}

/// Create a 406 Not Acceptable response
fn not_acceptable_response(requested: &[&str], supported: &[&str]) -> Response {
    let exc = ExceptionResponse::new(
        ExceptionKind::NotAcceptable,
        format!(
            "Content negotiation failed. Requested format(s) '{}' not supported. Supported formats: {}",
            requested.join(", "),
            supported.join(", ")
        ),
    );

    exception_response(StatusCode::NOT_ACCEPTABLE, &exc)
}

/// Helper to check Accept header for a data query resolved to `format`
pub fn check_data_accept(headers: &HeaderMap, format: OutputFormat) -> Result<(), Response> {
    check_accept_header(headers, &data_media_types(format))
}

/// Helper to check Accept header for metadata queries
pub fn check_metadata_accept(headers: &HeaderMap) -> Result<(), Response> {
    check_accept_header(headers, METADATA_MEDIA_TYPES)
}
