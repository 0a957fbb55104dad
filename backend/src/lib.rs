//! # PowerUp SA
//!
//! Load-shedding status for South African areas.
//!
//! The crate has two halves:
//!
//! - a thin HTTP proxy in front of the third-party status API, which adds
//!   the API token and a CORS policy and otherwise passes payloads through
//!   ([`upstream`], [`http`]);
//! - the client side that talks to that proxy, substitutes mock data when it
//!   is unreachable, keeps favorite areas in durable storage, and holds the
//!   view state ([`client`], [`favorites`], [`presenter`]).
//!
//! ## Architecture
//!
//! - [`api`]: Data types shared by both halves
//! - [`config`]: Proxy configuration from file and environment
//! - [`upstream`]: Outbound calls to the status API
//! - [`http`]: Axum router, handlers, and error envelope
//! - [`client`]: Proxy client with the fallback policy
//! - [`favorites`]: Favorite areas in key-value storage
//! - [`presenter`]: View state and its update actions

pub mod api;
pub mod client;
pub mod config;
pub mod favorites;
pub mod presenter;
pub mod upstream;

#[cfg(feature = "http-server")]
pub mod http;
