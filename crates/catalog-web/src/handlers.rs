//! View handlers, one per route-table entry.
//!
//! Each handler builds a per-request [`ServersStore`](catalog_store::ServersStore),
//! runs the store action its view needs, and renders the store's state.
//! An upstream failure does not abort the page: the store has already
//! recorded the message, so the view renders it and the response status
//! reflects the failure.
//!
//! # Views
//!
//! | Path | View | Store action | Status on upstream failure |
//! |------|------|--------------|----------------------------|
//! | `/` | Home | `fetch_servers` | 502 |
//! | `/server/{id}` | ServerDetail | `fetch_server_detail` | 404 if upstream 404 or the id is unaddressable, else 502 |
//! | `/search?q=` | Search | `search_servers` (skipped for a blank query) | 502 |
//! | `/docs` | Docs | -- | -- |
//! | anything else | NotFound | -- | always 404 |

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use catalog_client::{ClientError, Transport};
use catalog_store::StoreState;
use catalog_types::ServerId;
use serde::Deserialize;

use crate::error::WebError;
use crate::routes::{ROUTES, ViewKind};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the home page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Continuation token of the page to show.
    pub cursor: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
}

/// Query parameters for the search page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Search text.
    pub q: Option<String>,
    /// Continuation token of the result page to show.
    pub cursor: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
}

/// Query parameters for the server detail page.
#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    /// Specific version of the server to show.
    pub version: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /` -- one page of the server list.
pub async fn home<T>(
    State(state): State<Arc<AppState<T>>>,
    Query(page): Query<PageQuery>,
) -> Result<Response, WebError>
where
    T: Transport + Clone + 'static,
{
    let store = state.new_store();
    let limit = state.page_limit(page.limit);
    let outcome = store.fetch_servers(limit, page.cursor.as_deref()).await;

    let context = view_context(
        &store.snapshot(),
        serde_json::json!({
            "limit": limit,
            "pager_action": "/",
        }),
    )?;
    render(&state, ViewKind::Home, outcome_status(&outcome), context)
}

/// `GET /server/{id}` -- one server's detail record.
pub async fn server_detail<T>(
    State(state): State<Arc<AppState<T>>>,
    Path(raw_id): Path<String>,
    Query(detail): Query<DetailQuery>,
) -> Result<Response, WebError>
where
    T: Transport + Clone + 'static,
{
    let store = state.new_store();
    let id = ServerId::from_path_segment(&raw_id);
    let outcome = store
        .fetch_server_detail(&id, detail.version.as_deref())
        .await;

    let context = view_context(
        &store.snapshot(),
        serde_json::json!({
            "id": id.to_string(),
            "version": detail.version,
        }),
    )?;
    render(&state, ViewKind::ServerDetail, outcome_status(&outcome), context)
}

/// `GET /search?q=` -- search form and, for a non-empty query, results.
pub async fn search<T>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, WebError>
where
    T: Transport + Clone + 'static,
{
    let store = state.new_store();
    let limit = state.page_limit(params.limit);
    // A blank query shows the empty form; anything else is sent as typed.
    let query = params.q.filter(|q| !q.trim().is_empty());

    let status = match &query {
        Some(q) => {
            let outcome = store
                .search_servers(q, limit, params.cursor.as_deref())
                .await;
            outcome_status(&outcome)
        }
        None => StatusCode::OK,
    };

    let context = view_context(
        &store.snapshot(),
        serde_json::json!({
            "query": query,
            "limit": limit,
            "pager_action": "/search",
        }),
    )?;
    render(&state, ViewKind::Search, status, context)
}

/// `GET /docs` -- static documentation, including the route table.
pub async fn docs<T>(State(state): State<Arc<AppState<T>>>) -> Result<Response, WebError>
where
    T: Transport + Clone + 'static,
{
    let context = serde_json::json!({ "routes": ROUTES });
    render(&state, ViewKind::Docs, StatusCode::OK, context)
}

/// Catch-all -- any path the route table does not otherwise match.
pub async fn not_found<T>(
    State(state): State<Arc<AppState<T>>>,
    uri: Uri,
) -> Result<Response, WebError>
where
    T: Transport + Clone + 'static,
{
    let context = serde_json::json!({ "path": uri.path() });
    render(&state, ViewKind::NotFound, StatusCode::NOT_FOUND, context)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Response status for a page whose store action ended with `outcome`.
fn outcome_status<R>(outcome: &Result<R, ClientError>) -> StatusCode {
    match outcome {
        Ok(_) => StatusCode::OK,
        Err(err) if err.is_not_found() => StatusCode::NOT_FOUND,
        Err(ClientError::InvalidPath(_)) => StatusCode::NOT_FOUND,
        Err(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Store state with page-specific fields layered on top.
fn view_context(
    snapshot: &StoreState,
    extra: serde_json::Value,
) -> Result<serde_json::Value, WebError> {
    let mut context = serde_json::to_value(snapshot)?;
    if let (Some(fields), serde_json::Value::Object(extra)) = (context.as_object_mut(), extra) {
        fields.extend(extra);
    }
    Ok(context)
}

fn render<T>(
    state: &AppState<T>,
    view: ViewKind,
    status: StatusCode,
    context: serde_json::Value,
) -> Result<Response, WebError> {
    let html = state.views.render(view, context)?;
    Ok((status, Html(html)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(outcome_status::<()>(&Ok(())), StatusCode::OK);
        assert_eq!(
            outcome_status::<()>(&Err(ClientError::Status {
                status: 404,
                body: String::new(),
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            outcome_status::<()>(&Err(ClientError::InvalidPath("..".to_owned()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            outcome_status::<()>(&Err(ClientError::Transport("refused".to_owned()))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn context_layers_extra_fields_over_state() {
        let snapshot = StoreState {
            error: Some("boom".to_owned()),
            ..StoreState::default()
        };
        let context = view_context(&snapshot, serde_json::json!({"limit": 20}));
        let context = context.unwrap_or_default();
        assert_eq!(context["error"], "boom");
        assert_eq!(context["limit"], 20);
        assert_eq!(context["loading"], false);
    }
}
