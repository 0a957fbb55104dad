//! Client-side access to the proxy.
//!
//! [`ProxyApi`] is the raw transport: it reports every failure.
//! [`LoadSheddingService`] layers the fallback policy on top: status, search
//! and schedule lookups always produce a value, substituting the canonical
//! mock data from [`fallback`] whenever the proxy cannot answer. Callers in
//! the presentation layer never see a transport error for these calls.

use async_trait::async_trait;
use serde_json::Value;

pub mod clock;
pub mod fallback;
pub mod proxy;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use proxy::ProxyClient;
pub use service::LoadSheddingService;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The proxy answered with a non-success status.
    #[error("Proxy responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request did not complete or the body was not JSON.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Raw calls against the proxy endpoints.
#[async_trait]
pub trait ProxyApi: Send + Sync {
    /// `GET {base}/status`
    async fn status(&self) -> ClientResult<Value>;

    /// `GET {base}/areas_search?text=...`
    async fn search_areas(&self, text: &str) -> ClientResult<Value>;

    /// `GET {base}/area?id=...`
    async fn area_schedule(&self, area_id: &str) -> ClientResult<Value>;
}
