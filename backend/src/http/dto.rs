//! Request and response bodies owned by the proxy itself.
//!
//! Successful upstream payloads are passed through as raw JSON and have no
//! DTO here.

use serde::{Deserialize, Serialize};

/// Query parameters for `/api/areas_search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: Option<String>,
}

/// Query parameters for `/api/area`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub api_key_configured: bool,
}

/// Error envelope shared by all proxy endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
