//! EDR API Service Library
//!
//! This crate provides the HTTP server implementation for the
//! OGC API - Environmental Data Retrieval specification.

pub mod config;
pub mod content_negotiation;
pub mod dataset;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the EDR router with its middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Landing page
        .route("/edr", get(handlers::landing::landing_handler))
        .route("/edr/", get(handlers::landing::landing_handler))
        // Conformance
        .route(
            "/edr/conformance",
            get(handlers::conformance::conformance_handler),
        )
        // Collections
        .route(
            "/edr/collections",
            get(handlers::collections::list_collections_handler),
        )
        .route(
            "/edr/collections/:collection_id",
            get(handlers::collections::get_collection_handler),
        )
        // Data queries
        .route(
            "/edr/collections/:collection_id/:query_type",
            get(handlers::data::data_query_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
