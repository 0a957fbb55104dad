//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, tracing) and creates
//! the axum router ready for serving.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::config::ProxyConfig;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState, config: &ProxyConfig) -> Router {
    let api = Router::new()
        .route("/status", get(handlers::get_status))
        .route("/areas_search", get(handlers::search_areas))
        .route("/area", get(handlers::get_area_schedule));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// Browser origins are checked against the configured exact origins and
/// host suffixes.
pub fn cors_layer(config: &ProxyConfig) -> CorsLayer {
    let policy = Arc::new(config.clone());
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts| {
                origin
                    .to_str()
                    .map(|origin| policy.is_origin_allowed(origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}
