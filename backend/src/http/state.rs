//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::upstream::{SePushClient, UpstreamClient};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client used for every outbound call
    pub upstream: Arc<dyn UpstreamClient>,
    /// Whether an upstream token was present at startup
    pub api_key_configured: bool,
}

impl AppState {
    pub fn new(upstream: Arc<dyn UpstreamClient>, api_key_configured: bool) -> Self {
        Self {
            upstream,
            api_key_configured,
        }
    }

    /// State backed by the real upstream API.
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(
            Arc::new(SePushClient::from_config(config)),
            config.api_key_configured(),
        )
    }
}
