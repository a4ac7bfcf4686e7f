//! Server-rendered browser for the Server Catalog.
//!
//! This crate serves the catalog's client-visible pages:
//!
//! - **Home** (`/`) -- paginated server list
//! - **Server detail** (`/server/{id}`) -- one record, optionally a specific version
//! - **Search** (`/search?q=`) -- filtered list
//! - **Docs** (`/docs`) -- static help, including the route table
//! - **Not found** -- everything else
//!
//! # Architecture
//!
//! ```text
//! request --> route table --> handler --> ServersStore action --> ApiClient --> catalog API
//!                                |                |
//!                                +-- snapshot <---+--> minijinja view --> HTML
//! ```
//!
//! The route table ([`routes::ROUTES`]) is explicit and the Axum router is
//! built from it. Views are `minijinja` templates embedded in the binary.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

// Re-export primary types for convenience.
pub use config::{LogFormat, WebConfig};
pub use error::WebError;
pub use router::build_router;
pub use routes::{ROUTES, RouteDef, ViewKind};
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
pub use views::ViewEngine;
