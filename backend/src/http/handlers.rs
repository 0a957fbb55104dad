//! HTTP handlers for the proxy API.
//!
//! Each handler validates its query, then delegates to the upstream client
//! and passes the payload through unchanged.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};

use super::dto::{AreaQuery, HealthResponse, SearchQuery};
use super::error::{AppError, AREA_ID_REQUIRED, SEARCH_TEXT_TOO_SHORT};
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Minimum number of characters accepted by the area search.
pub const MIN_SEARCH_CHARS: usize = 3;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "PowerUp SA Backend is running".to_string(),
        api_key_configured: state.api_key_configured,
    })
}

// =============================================================================
// Upstream passthrough
// =============================================================================

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> HandlerResult<Value> {
    let data = state.upstream.fetch_status().await.map_err(|e| {
        error!(error = %e, "Status error");
        AppError::upstream("Failed to fetch status")(e)
    })?;

    Ok(Json(data))
}

/// GET /api/areas_search?text=...
pub async fn search_areas(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> HandlerResult<Value> {
    let query = accept_query(query).unwrap_or_default();
    let text = validate_search_text(query.text.as_deref())?;
    info!(text, "Searching for areas");

    let data = state.upstream.search_areas(text).await.map_err(|e| {
        error!(error = %e, "Search error");
        AppError::upstream("Failed to search areas")(e)
    })?;

    Ok(Json(data))
}

/// GET /api/area?id=...
pub async fn get_area_schedule(
    State(state): State<AppState>,
    query: Result<Query<AreaQuery>, QueryRejection>,
) -> HandlerResult<Value> {
    let query = accept_query(query).unwrap_or_default();
    let id = validate_area_id(query.id.as_deref())?;
    info!(area_id = id, "Fetching schedule for area");

    let data = state.upstream.fetch_schedule(id).await.map_err(|e| {
        error!(error = %e, "Schedule error");
        AppError::upstream("Failed to fetch area schedule")(e)
    })?;

    Ok(Json(data))
}

// =============================================================================
// Validation
// =============================================================================

/// A query string that does not decode (e.g. a repeated key) counts as
/// missing parameters, so it ends in the JSON validation envelope rather
/// than axum's plain-text rejection.
fn accept_query<T>(query: Result<Query<T>, QueryRejection>) -> Option<T> {
    match query {
        Ok(Query(query)) => Some(query),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Undecodable query string");
            None
        }
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_search_text(text: Option<&str>) -> Result<&str, AppError> {
    match text {
        Some(text) if text.chars().count() >= MIN_SEARCH_CHARS => Ok(text),
        _ => {
            warn!("Rejected area search with short or missing text");
            Err(AppError::Validation(SEARCH_TEXT_TOO_SHORT))
        }
    }
}

/// An empty id is treated as missing.
pub fn validate_area_id(id: Option<&str>) -> Result<&str, AppError> {
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => {
            warn!("Rejected schedule request without area id");
            Err(AppError::Validation(AREA_ID_REQUIRED))
        }
    }
}
