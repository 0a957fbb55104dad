//! `reqwest`-backed [`ProxyApi`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{ClientError, ClientResult, ProxyApi};

pub const DEFAULT_PROXY_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for ProxyClient {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_BASE_URL)
    }
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> ClientResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling proxy");

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }
}

#[async_trait]
impl ProxyApi for ProxyClient {
    async fn status(&self) -> ClientResult<Value> {
        self.get("/status", &[]).await
    }

    async fn search_areas(&self, text: &str) -> ClientResult<Value> {
        self.get("/areas_search", &[("text", text)]).await
    }

    async fn area_schedule(&self, area_id: &str) -> ClientResult<Value> {
        self.get("/area", &[("id", area_id)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ProxyClient::default().base_url(), DEFAULT_PROXY_BASE_URL);
        assert_eq!(ProxyClient::new("http://x.test/api/").base_url(), "http://x.test/api");
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_transport_error() {
        let client = ProxyClient::new("http://127.0.0.1:9/api");
        let err = client.status().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
