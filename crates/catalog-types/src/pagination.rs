//! Pagination request parameters and the list response envelope.
//!
//! The catalog paginates forward with an opaque cursor: each list response
//! carries `metadata.next_cursor`, which the client echoes back as the
//! `cursor` query parameter to fetch the following page. The raw API also
//! exposes an offset-based search (`q`, `limit`, `offset`), modelled by
//! [`SearchParams`].

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::record::ServerRecord;

/// Page size used by list and search actions when the caller has no preference.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Result limit of the raw search endpoint when the caller has no preference.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Query parameters for `GET /servers`.
///
/// Absent fields are not sent. Empty `cursor` and `search` strings count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ListParams {
    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Continuation token from a previous page's `metadata.next_cursor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Free-text filter applied by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListParams {
    /// Parameters for a first page of `limit` records.
    pub const fn new(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            cursor: None,
            search: None,
        }
    }

    /// Continue from `cursor`. `None` or an empty token leaves the cursor unset.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<&str>) -> Self {
        self.cursor = non_empty(cursor);
        self
    }

    /// Filter by `search`. An empty query leaves the filter unset.
    #[must_use]
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = non_empty(search);
        self
    }

    /// Render the parameters as query pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            pairs.push(("cursor".to_owned(), cursor.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_owned(), search.clone()));
        }
        pairs
    }
}

/// Query parameters for the raw offset-based search on `GET /servers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SearchParams {
    /// Search text, sent as `q`.
    pub q: String,
    /// Maximum number of records to return.
    pub limit: u32,
    /// Number of records to skip.
    pub offset: u32,
}

impl SearchParams {
    /// Search for `query` with the default limit and a zero offset.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            q: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }

    /// Override the result limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Override the offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Render the parameters as query pairs (`q`, `limit`, `offset`).
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("q".to_owned(), self.q.clone()),
            ("limit".to_owned(), self.limit.to_string()),
            ("offset".to_owned(), self.offset.to_string()),
        ]
    }
}

/// Typed view of the pagination fields inside a list response's `metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PageMetadata {
    /// Token for the next page; absent on the last page.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Number of records in this page, when the backend reports it.
    #[serde(default)]
    pub count: Option<u32>,
}

/// Body of a `GET /servers` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerListResponse {
    /// Records in this page. A missing or `null` array reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub servers: Vec<ServerRecord>,
    /// Backend pagination metadata, kept verbatim.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl ServerListResponse {
    /// The continuation token for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("next_cursor"))
            .and_then(serde_json::Value::as_str)
            .filter(|cursor| !cursor.is_empty())
            .map(ToOwned::to_owned)
    }

    /// Typed pagination metadata. Fields the backend omits read as `None`.
    pub fn page_metadata(&self) -> PageMetadata {
        self.metadata
            .as_ref()
            .and_then(|m| serde_json::from_value(m.clone()).ok())
            .unwrap_or_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(ToOwned::to_owned)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ServerRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ServerRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn list_params_skip_absent_and_empty_fields() {
        let params = ListParams::new(20).with_cursor(Some("")).with_search(None);
        assert_eq!(params.query_pairs(), pairs(&[("limit", "20")]));

        let params = ListParams::new(10)
            .with_cursor(Some("abc"))
            .with_search(Some("redis"));
        assert_eq!(
            params.query_pairs(),
            pairs(&[("limit", "10"), ("cursor", "abc"), ("search", "redis")])
        );
    }

    #[test]
    fn search_params_defaults() {
        let params = SearchParams::new("redis");
        assert_eq!(
            params.query_pairs(),
            pairs(&[("q", "redis"), ("limit", "50"), ("offset", "0")])
        );
        let params = SearchParams::new("redis").with_limit(5).with_offset(10);
        assert_eq!(params.limit, 5);
        assert_eq!(params.offset, 10);
    }

    #[test]
    fn list_response_reads_cursor_from_metadata() {
        let body = serde_json::json!({
            "servers": [{"id": 1}, {"id": 2}],
            "metadata": {"next_cursor": "abc", "count": 2}
        });
        let response: ServerListResponse = serde_json::from_value(body).unwrap_or_default();
        assert_eq!(response.servers.len(), 2);
        assert_eq!(response.next_cursor().as_deref(), Some("abc"));
        assert_eq!(
            response.page_metadata(),
            PageMetadata {
                next_cursor: Some("abc".to_owned()),
                count: Some(2),
            }
        );
    }

    #[test]
    fn list_response_tolerates_missing_fields() {
        let response: ServerListResponse =
            serde_json::from_value(serde_json::json!({"servers": null}))
                .unwrap_or_else(|_| ServerListResponse {
                    servers: vec![ServerRecord::default()],
                    metadata: None,
                });
        assert!(response.servers.is_empty());
        assert_eq!(response.next_cursor(), None);
        assert_eq!(response.page_metadata(), PageMetadata::default());
    }

    #[test]
    fn empty_cursor_means_last_page() {
        let response = ServerListResponse {
            servers: Vec::new(),
            metadata: Some(serde_json::json!({"next_cursor": ""})),
        };
        assert_eq!(response.next_cursor(), None);
    }
}
