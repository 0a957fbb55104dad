//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorBody;
use crate::upstream::UpstreamError;

pub const SEARCH_TEXT_TOO_SHORT: &str = "Search text must be at least 3 characters";
pub const AREA_ID_REQUIRED: &str = "Area ID is required";

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Input rejected before any outbound call
    Validation(&'static str),
    /// Outbound call failed; `context` names the operation for the client
    Upstream {
        context: &'static str,
        source: UpstreamError,
    },
}

impl AppError {
    pub fn upstream(context: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| AppError::Upstream { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { source, .. } => source
                .status_code()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Validation(message) => ErrorBody {
                error: message.to_string(),
                details: None,
            },
            AppError::Upstream { context, source } => ErrorBody {
                error: context.to_string(),
                details: Some(source.details()),
            },
        };

        (status, Json(body)).into_response()
    }
}
