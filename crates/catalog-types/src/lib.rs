//! Shared type definitions for the Server Catalog client.
//!
//! This crate is the single source of truth for the payloads exchanged with
//! the upstream catalog API. Request and pagination types flow downstream to
//! `TypeScript` via `ts-rs` for browser-side consumers.
//!
//! # Modules
//!
//! - [`ids`] -- Server identifiers (numeric or textual)
//! - [`record`] -- Opaque server record with identity lookup
//! - [`pagination`] -- List/search parameters and the list response envelope

pub mod ids;
pub mod pagination;
pub mod record;

// Re-export all public types at crate root for convenience.
pub use ids::ServerId;
pub use pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_LIMIT, ListParams, PageMetadata, SearchParams,
    ServerListResponse,
};
pub use record::ServerRecord;
