//! HTTP request handlers for the EDR API.

pub mod landing;
pub mod conformance;
pub mod collections;
pub mod data;
pub mod health;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use edr_protocol::{
    media_types,
    responses::{ExceptionKind, ExceptionResponse},
    EdrError,
};
use metrics::counter;
use serde::Serialize;

/// Build a response with a body and content headers.
pub(crate) fn body_response(
    status: StatusCode,
    content_type: &str,
    cache_control: Option<&str>,
    body: impl Into<axum::body::Body>,
) -> Response {
    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(cache_control) = cache_control {
        builder = builder.header(header::CACHE_CONTROL, cache_control);
    }
    builder
        .body(body.into())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Serialize a metadata document as pretty JSON.
pub(crate) fn json_response<T: Serialize>(value: &T, cache_control: &str) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(json) => body_response(StatusCode::OK, media_types::JSON, Some(cache_control), json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response");
            exception_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ExceptionResponse::new(ExceptionKind::ServerError, e.to_string()),
            )
        }
    }
}

/// Serialize an OGC exception document.
pub(crate) fn exception_response(status: StatusCode, exc: &ExceptionResponse) -> Response {
    let json = serde_json::to_string(exc).unwrap_or_default();
    body_response(status, media_types::JSON, None, json)
}

/// Map a protocol error to its exception response and count it.
pub(crate) fn edr_error_response(err: &EdrError, instance: &str) -> Response {
    counter!("edr_query_errors_total", "kind" => err.kind()).increment(1);
    tracing::warn!(kind = err.kind(), instance, "{}", err);

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    exception_response(status, &err.to_exception().with_instance(instance))
}
