//! Shared application state for the view server.

use catalog_client::{ApiClient, HttpTransport, Transport};
use catalog_store::ServersStore;

use crate::views::ViewEngine;

/// Largest page a visitor may request through `?limit=`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// State shared by every request handler.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Each request gets its own [`ServersStore`] built from the
/// shared client, so one visitor's loading/error flags never leak into
/// another's page.
#[derive(Debug)]
pub struct AppState<T = HttpTransport> {
    /// Client for the upstream catalog API.
    pub client: ApiClient<T>,
    /// Template renderer.
    pub views: ViewEngine,
    /// Page size used when the request does not ask for one.
    pub page_size: u32,
}

impl<T: Transport + Clone> AppState<T> {
    /// Assemble the application state.
    pub const fn new(client: ApiClient<T>, views: ViewEngine, page_size: u32) -> Self {
        Self {
            client,
            views,
            page_size,
        }
    }

    /// A fresh store for one request.
    pub fn new_store(&self) -> ServersStore<T> {
        ServersStore::new(self.client.clone())
    }

    /// The page size to use for a request, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_limit(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.page_size).clamp(1, MAX_PAGE_SIZE)
    }
}
