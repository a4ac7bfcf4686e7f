//! State store for the Server Catalog client.
//!
//! [`ServersStore`] sits between views and the
//! [`ApiClient`](catalog_client::ApiClient). It holds the fetched list, the
//! selected server, the loading/error flags and the pagination cursor, and
//! exposes them both as getters and as a [`tokio::sync::watch`] channel so
//! any view layer can react to changes.
//!
//! # Actions
//!
//! | Action | API call | State written |
//! |--------|----------|---------------|
//! | `fetch_servers` | `GET /servers?limit&cursor` | list, cursor, page metadata |
//! | `search_servers` | `GET /servers?limit&search&cursor` | list, cursor, page metadata, active search |
//! | `fetch_next_page` | either of the above, from `next_cursor` | as above |
//! | `fetch_server_detail` | `GET /servers/{id}?version` | current server |
//!
//! All actions clear `error` on entry, record it on failure, and reset
//! `loading` on every exit path.

mod guard;
pub mod state;
pub mod store;

// Re-export primary types for convenience.
pub use state::StoreState;
pub use store::{FETCH_DETAIL_FAILED, FETCH_LIST_FAILED, SEARCH_FAILED, ServersStore};
