//! Store state.

use catalog_types::{ServerId, ServerRecord};
use serde::Serialize;

/// Everything the store holds, as seen by views.
///
/// A view either renders a clone of this (see
/// [`ServersStore::snapshot`](crate::ServersStore::snapshot)) or subscribes
/// to changes. "Never fetched" and "fetched zero results" look the same: an
/// empty `servers` list with `loading == false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreState {
    /// Records of the last list or search page.
    pub servers: Vec<ServerRecord>,
    /// The most recently fetched detail record.
    pub current_server: Option<ServerRecord>,
    /// Whether an action is in flight.
    pub loading: bool,
    /// Message of the last failed action; cleared when an action starts.
    pub error: Option<String>,
    /// Continuation token of the last page, if there is a next page.
    pub next_cursor: Option<String>,
    /// Whether `next_cursor` points at another page.
    pub has_next_page: bool,
    /// Raw `metadata` object of the last page.
    pub current_page_data: Option<serde_json::Value>,
    /// Query of the last successful search; `None` after a plain list fetch.
    pub active_search: Option<String>,
}

impl StoreState {
    /// Linear scan of `servers` for a record whose `id` equals `id`.
    pub fn find_server(&self, id: &ServerId) -> Option<&ServerRecord> {
        self.servers.iter().find(|server| server.has_id(id))
    }
}
