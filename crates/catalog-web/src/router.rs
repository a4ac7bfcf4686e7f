//! Axum router construction from the route table.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use catalog_client::Transport;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::routes::{ROUTES, ViewKind};
use crate::state::AppState;

/// Build the complete router for the view server.
///
/// Every entry of [`ROUTES`] is registered with the handler for its view:
/// - `GET /` -- server list
/// - `GET /server/{id}` -- server detail
/// - `GET /search` -- search
/// - `GET /docs` -- documentation
/// - `GET /{*path}` -- not found
///
/// Requests are traced through `tower-http`'s [`TraceLayer`].
pub fn build_router<T>(state: Arc<AppState<T>>) -> Router
where
    T: Transport + Clone + 'static,
{
    ROUTES
        .iter()
        .fold(Router::new(), |router, route| {
            let handler = match route.view {
                ViewKind::Home => get(handlers::home::<T>),
                ViewKind::ServerDetail => get(handlers::server_detail::<T>),
                ViewKind::Search => get(handlers::search::<T>),
                ViewKind::Docs => get(handlers::docs::<T>),
                ViewKind::NotFound => get(handlers::not_found::<T>),
            };
            router.route(route.pattern, handler)
        })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
