//! Catalog API operations, one method per endpoint.

use catalog_types::{ListParams, SearchParams, ServerId, ServerListResponse, ServerRecord};

use crate::error::ClientError;
use crate::transport::{ApiRequest, HttpTransport, Transport, check_path_segment};

/// Path segment of the servers collection.
const SERVERS: &str = "servers";

/// Client for the catalog API.
///
/// Generic over the [`Transport`] so the same operations run against the
/// real backend or a scripted mock. No retries and no caching: every call is
/// one request, and failures come back unchanged.
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Wrap a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrow the underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /servers` with `params` forwarded as query parameters.
    pub async fn list_servers(&self, params: &ListParams) -> Result<ServerListResponse, ClientError> {
        let request = ApiRequest::new([SERVERS]).with_query(params.query_pairs());
        let body = self.transport.get(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// `GET /servers/{id}`, adding `version` as a query parameter when given.
    ///
    /// The id is sent as one path segment exactly as it displays. An id of
    /// `.` or `..` fails with [`ClientError::InvalidPath`] without a request.
    pub async fn get_server_detail(
        &self,
        id: &ServerId,
        version: Option<&str>,
    ) -> Result<ServerRecord, ClientError> {
        let segment = id.to_string();
        check_path_segment(&segment)?;
        let query = version
            .filter(|v| !v.is_empty())
            .map(|v| vec![("version".to_owned(), v.to_owned())])
            .unwrap_or_default();
        let request = ApiRequest::new([SERVERS.to_owned(), segment]).with_query(query);
        let body = self.transport.get(request).await?;
        Ok(ServerRecord::new(body))
    }

    /// Offset-based search: `GET /servers?q=..&limit=..&offset=..`.
    pub async fn search_servers(
        &self,
        params: &SearchParams,
    ) -> Result<ServerListResponse, ClientError> {
        let request = ApiRequest::new([SERVERS]).with_query(params.query_pairs());
        let body = self.transport.get(request).await?;
        Ok(serde_json::from_value(body)?)
    }
}
