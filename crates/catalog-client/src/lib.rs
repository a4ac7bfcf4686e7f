//! HTTP API client for the Server Catalog.
//!
//! This crate wraps the three catalog endpoints the browser client needs:
//!
//! - **list** -- `GET /servers` with cursor pagination and an optional filter
//! - **detail** -- `GET /servers/{id}` with an optional `version`
//! - **search** -- `GET /servers` with `q`/`limit`/`offset`
//!
//! # Architecture
//!
//! [`ApiClient`] builds an [`ApiRequest`] per call and hands it to a
//! [`Transport`]. [`HttpTransport`] issues it with `reqwest` (fixed base
//! URL, JSON headers, fixed timeout); [`MockTransport`] serves scripted
//! replies for tests. Responses are decoded into the shared
//! `catalog-types` payloads and nothing else: no retries, no caching.

pub mod api;
pub mod config;
pub mod error;
pub mod mock;
pub mod transport;

// Re-export primary types for convenience.
pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use mock::{MockGate, MockTransport};
pub use transport::{
    ApiRequest, HttpTransport, Transport, check_path_segment, encode_path_segment,
};
