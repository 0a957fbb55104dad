//! Client for the third-party load-shedding status API.
//!
//! The proxy depends on the [`UpstreamClient`] trait rather than a concrete
//! HTTP client so handlers can be exercised against an in-process fake.
//! [`SePushClient`] is the production implementation.
//!
//! Payloads are returned as raw JSON: the proxy passes them through
//! untouched, so decoding into typed models happens on the client side.

use async_trait::async_trait;
use serde_json::Value;

pub mod sepush;

pub use sepush::SePushClient;

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Failure of an outbound call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// The call completed with a non-success status.
    #[error("Upstream responded with status {status}")]
    Status { status: u16, body: Value },

    /// The call did not complete (timeout, DNS, refused connection) or the
    /// success body could not be decoded.
    #[error("Network error: {message}")]
    Network { message: String },

    /// No token is configured, so the call was not attempted.
    #[error("Upstream API key is not configured")]
    MissingApiKey,
}

impl UpstreamError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Upstream status code, when the call got that far.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::MissingApiKey => None,
        }
    }

    /// Payload for the `details` field of the proxy's error envelope:
    /// the upstream body when there is one, else the error message.
    pub fn details(&self) -> Value {
        match self {
            Self::Status { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

/// Read-only operations offered by the upstream status API.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// `GET /status`
    async fn fetch_status(&self) -> UpstreamResult<Value>;

    /// `GET /areas_search?text=...`
    async fn search_areas(&self, text: &str) -> UpstreamResult<Value>;

    /// `GET /area?id=...`
    async fn fetch_schedule(&self, area_id: &str) -> UpstreamResult<Value>;
}
