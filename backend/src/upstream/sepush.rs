//! `reqwest`-backed implementation of [`UpstreamClient`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use super::{UpstreamClient, UpstreamError, UpstreamResult};
use crate::config::ProxyConfig;

/// Header the upstream API reads its token from.
const TOKEN_HEADER: &str = "token";

/// Upstream client for the business status API.
#[derive(Clone)]
pub struct SePushClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SePushClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(config.upstream_base_url.clone(), config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> UpstreamResult<Value> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!(endpoint, "Upstream call skipped: API key not configured");
            return Err(UpstreamError::MissingApiKey);
        };

        let response = self
            .http
            .get(self.endpoint_url(endpoint))
            .header(TOKEN_HEADER, api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint, error = %e, "Upstream request failed");
                UpstreamError::network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(endpoint, error = %e, "Failed to read upstream body");
            UpstreamError::network(e.to_string())
        })?;

        if !status.is_success() {
            error!(endpoint, status = status.as_u16(), body = %body.trim(), "Upstream returned an error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: parse_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(endpoint, error = %e, "Upstream body is not valid JSON");
            UpstreamError::network(format!("Invalid JSON from upstream: {}", e))
        })
    }
}

/// Error bodies are kept as JSON when they parse, otherwise as a string.
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.trim().to_string()))
}

#[async_trait]
impl UpstreamClient for SePushClient {
    async fn fetch_status(&self) -> UpstreamResult<Value> {
        info!("Fetching current status");
        let data = self.get("/status", &[]).await?;
        info!("Status fetched successfully");
        Ok(data)
    }

    async fn search_areas(&self, text: &str) -> UpstreamResult<Value> {
        info!(text, "Searching areas");
        let data = self.get("/areas_search", &[("text", text)]).await?;
        let found = data
            .get("areas")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        info!(found, "Area search completed");
        Ok(data)
    }

    async fn fetch_schedule(&self, area_id: &str) -> UpstreamResult<Value> {
        info!(area_id, "Fetching area schedule");
        let data = self.get("/area", &[("id", area_id)]).await?;
        info!(area_id, "Schedule fetched successfully");
        Ok(data)
    }
}
