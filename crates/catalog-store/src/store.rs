//! The servers store: async actions, synchronous getters, and the state
//! channel views subscribe to.

use catalog_client::{ApiClient, ClientError, HttpTransport, Transport};
use catalog_types::{ListParams, ServerId, ServerListResponse, ServerRecord};
use tokio::sync::watch;

use crate::guard::LoadingGuard;
use crate::state::StoreState;

/// Message recorded when a failed list fetch carries no text of its own.
pub const FETCH_LIST_FAILED: &str = "Failed to fetch server list";

/// Message recorded when a failed detail fetch carries no text of its own.
pub const FETCH_DETAIL_FAILED: &str = "Failed to fetch server details";

/// Message recorded when a failed search carries no text of its own.
pub const SEARCH_FAILED: &str = "Failed to search servers";

/// State holder between views and the catalog API.
///
/// Every async action follows the same lifecycle: set `loading` and clear
/// `error`, call the API, copy the response into state, and on failure
/// record a message, log it, and hand the original error back. `loading`
/// is reset by a drop guard, so it is cleared on success, on failure, and
/// when the action future is dropped mid-flight.
///
/// Overlapping actions are not serialized. Each writes its result when its
/// response arrives, so the last one to resolve wins.
#[derive(Debug)]
pub struct ServersStore<T = HttpTransport> {
    client: ApiClient<T>,
    state: watch::Sender<StoreState>,
}

impl<T: Transport> ServersStore<T> {
    /// Create an empty store backed by `client`.
    pub fn new(client: ApiClient<T>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { client, state }
    }

    /// The API client actions go through.
    pub const fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Fetch a page of servers, continuing from `cursor` when given.
    pub async fn fetch_servers(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<ServerListResponse, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let params = ListParams::new(limit).with_cursor(cursor);

        match self.client.list_servers(&params).await {
            Ok(response) => {
                tracing::debug!(count = response.servers.len(), "server list fetched");
                self.apply_page(&response, None);
                Ok(response)
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching servers");
                Err(self.record_failure(err, FETCH_LIST_FAILED))
            }
        }
    }

    /// Fetch one server's detail record and make it the current server.
    pub async fn fetch_server_detail(
        &self,
        id: &ServerId,
        version: Option<&str>,
    ) -> Result<ServerRecord, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);

        match self.client.get_server_detail(id, version).await {
            Ok(record) => {
                let current = record.clone();
                self.state.send_modify(|s| s.current_server = Some(current));
                Ok(record)
            }
            Err(err) => {
                tracing::error!(%id, error = %err, "error fetching server");
                Err(self.record_failure(err, FETCH_DETAIL_FAILED))
            }
        }
    }

    /// Search servers through the list endpoint's `search` filter.
    ///
    /// Results replace the held list exactly like a list fetch, and the
    /// query is remembered so [`fetch_next_page`](Self::fetch_next_page)
    /// keeps paging through the same search.
    ///
    /// An empty `query` sends no `search` parameter at all. The request is
    /// then a plain list fetch and clears the remembered search.
    pub async fn search_servers(
        &self,
        query: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<ServerListResponse, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let params = ListParams::new(limit)
            .with_search(Some(query))
            .with_cursor(cursor);

        let result = self.client.list_servers(&params).await;
        match result {
            Ok(response) => {
                tracing::debug!(query, count = response.servers.len(), "search completed");
                self.apply_page(&response, params.search);
                Ok(response)
            }
            Err(err) => {
                tracing::error!(query, error = %err, "error searching servers");
                Err(self.record_failure(err, SEARCH_FAILED))
            }
        }
    }

    /// Fetch the page after the current one, repeating the last search if
    /// the current page came from a search.
    ///
    /// Returns `Ok(None)` without issuing a request when there is no next
    /// page.
    pub async fn fetch_next_page(
        &self,
        limit: u32,
    ) -> Result<Option<ServerListResponse>, ClientError> {
        let (cursor, search) = {
            let state = self.state.borrow();
            (state.next_cursor.clone(), state.active_search.clone())
        };
        let Some(cursor) = cursor else {
            return Ok(None);
        };

        let response = match search {
            Some(query) => self.search_servers(&query, limit, Some(&cursor)).await?,
            None => self.fetch_servers(limit, Some(&cursor)).await?,
        };
        Ok(Some(response))
    }

    /// Forget the current detail record.
    pub fn clear_current_server(&self) {
        self.state.send_modify(|s| s.current_server = None);
    }

    // -----------------------------------------------------------------------
    // Getters
    // -----------------------------------------------------------------------

    /// The record in the current list whose `id` equals `id`, if any.
    pub fn get_server_by_id(&self, id: &ServerId) -> Option<ServerRecord> {
        self.state.borrow().find_server(id).cloned()
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Records of the last list or search page.
    pub fn servers(&self) -> Vec<ServerRecord> {
        self.state.borrow().servers.clone()
    }

    /// The current detail record.
    pub fn current_server(&self) -> Option<ServerRecord> {
        self.state.borrow().current_server.clone()
    }

    /// Whether an action is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Message of the last failed action.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Continuation token for the next page.
    pub fn next_cursor(&self) -> Option<String> {
        self.state.borrow().next_cursor.clone()
    }

    /// Whether another page is available.
    pub fn has_next_page(&self) -> bool {
        self.state.borrow().has_next_page
    }

    /// Raw metadata of the last page.
    pub fn current_page_data(&self) -> Option<serde_json::Value> {
        self.state.borrow().current_page_data.clone()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn apply_page(&self, response: &ServerListResponse, search: Option<String>) {
        let next_cursor = response.next_cursor();
        self.state.send_modify(|s| {
            s.servers.clone_from(&response.servers);
            s.has_next_page = next_cursor.is_some();
            s.next_cursor = next_cursor;
            s.current_page_data.clone_from(&response.metadata);
            s.active_search = search;
        });
    }

    fn record_failure(&self, err: ClientError, fallback: &str) -> ClientError {
        let message = failure_message(&err, fallback);
        self.state.send_modify(|s| s.error = Some(message));
        err
    }
}

/// The error's own text, or `fallback` when that text is blank.
fn failure_message(err: &ClientError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use catalog_client::MockTransport;

    use super::*;

    fn store_with(transport: MockTransport) -> ServersStore<MockTransport> {
        ServersStore::new(ApiClient::new(transport))
    }

    #[test]
    fn failure_message_falls_back_on_blank_text() {
        let blank = ClientError::Transport("  ".to_owned());
        assert_eq!(failure_message(&blank, FETCH_LIST_FAILED), FETCH_LIST_FAILED);

        let refused = ClientError::Transport("connection refused".to_owned());
        assert_eq!(
            failure_message(&refused, FETCH_LIST_FAILED),
            "connection refused"
        );
    }

    #[test]
    fn new_store_is_empty_and_idle() {
        let store = store_with(MockTransport::new());
        assert_eq!(store.snapshot(), StoreState::default());
        assert!(store.servers().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.get_server_by_id(&ServerId::from(1)), None);
    }

    #[tokio::test]
    async fn blank_error_records_default_message() {
        let transport = MockTransport::new();
        transport.push_err(ClientError::Transport(String::new()));
        transport.push_err(ClientError::Transport(String::new()));
        transport.push_err(ClientError::Transport(String::new()));
        let store = store_with(transport);

        assert!(store.fetch_servers(20, None).await.is_err());
        assert_eq!(store.error().as_deref(), Some(FETCH_LIST_FAILED));

        assert!(store.fetch_server_detail(&ServerId::from(1), None).await.is_err());
        assert_eq!(store.error().as_deref(), Some(FETCH_DETAIL_FAILED));

        assert!(store.search_servers("redis", 20, None).await.is_err());
        assert_eq!(store.error().as_deref(), Some(SEARCH_FAILED));
    }

    #[tokio::test]
    async fn empty_search_is_a_plain_list_fetch() {
        let transport = MockTransport::new();
        transport.push_ok(serde_json::json!({
            "servers": [{"id": 1}],
            "metadata": {"next_cursor": "p2"}
        }));
        transport.push_ok(serde_json::json!({"servers": [{"id": 2}]}));
        let store = store_with(transport);

        assert!(store.search_servers("redis", 20, None).await.is_ok());
        assert_eq!(store.snapshot().active_search.as_deref(), Some("redis"));

        assert!(store.search_servers("", 20, None).await.is_ok());
        assert_eq!(store.snapshot().active_search, None);

        let requests = store.client().transport().requests();
        let last = requests.last();
        assert_eq!(last.and_then(|r| r.query_value("search")), None);
        assert_eq!(last.and_then(|r| r.query_value("limit")), Some("20"));
        assert_eq!(store.servers().len(), 1);
    }

    #[tokio::test]
    async fn next_page_without_cursor_skips_the_request() {
        let transport = MockTransport::new();
        let store = store_with(transport);

        let page = store.fetch_next_page(20).await;
        assert!(matches!(page, Ok(None)));
        assert!(store.client().transport().requests().is_empty());
    }
}
