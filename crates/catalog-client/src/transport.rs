//! Transport abstraction and the reqwest-backed HTTP implementation.
//!
//! [`ApiClient`](crate::ApiClient) never touches the network directly. It
//! describes each call as an [`ApiRequest`] and hands it to a [`Transport`],
//! which returns the decoded JSON body. Production code uses
//! [`HttpTransport`]; tests substitute [`MockTransport`](crate::MockTransport).

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// A `GET` request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiRequest {
    /// Path segments appended to the base URL. Each is percent-encoded on
    /// its own, so a segment may contain `/`.
    pub segments: Vec<String>,
    /// Query parameters, sent in order.
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// A request for the given path segments with no query.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    /// Replace the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// The path relative to the base URL, e.g. `/servers/42`. Segments are
    /// shown unencoded.
    pub fn path(&self) -> String {
        self.segments.iter().fold(String::new(), |mut path, segment| {
            path.push('/');
            path.push_str(segment);
            path
        })
    }

    /// Value of the first query parameter named `name`.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Reject `.` and `..`, which a URL cannot carry as literal path segments.
///
/// URL parsing treats them (and their `%2E` spellings) as navigation, so
/// `servers/..` would silently become a request for the parent path.
pub fn check_path_segment(segment: &str) -> Result<(), ClientError> {
    if matches!(segment, "." | "..") {
        return Err(ClientError::InvalidPath(format!(
            "segment {segment:?} cannot be addressed in a URL"
        )));
    }
    Ok(())
}

/// Percent-encode `segment` as a single URL path segment, the same way
/// [`HttpTransport`] encodes request paths. `/` becomes `%2F`.
///
/// `.` and `..` come back as `%2E` and `%2E%2E` so a link never collapses
/// to its parent path in the page markup.
pub fn encode_path_segment(segment: &str) -> String {
    match segment {
        "." => return "%2E".to_owned(),
        ".." => return "%2E%2E".to_owned(),
        _ => {}
    }
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return segment.to_owned();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }
    url.path().strip_prefix('/').unwrap_or_default().to_owned()
}

/// Something that can execute an [`ApiRequest`] and return its JSON body.
pub trait Transport: Send + Sync {
    /// Issue the request and return the response body.
    fn get(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> + Send;
}

/// HTTP transport backed by a shared [`reqwest::Client`].
///
/// The client is built once with the JSON content-type header and the fixed
/// timeout from [`ClientConfig`]. Cloning is cheap: clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL does not parse or
    /// cannot carry a path, and [`ClientError::Transport`] if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL {} cannot carry a path",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    /// The base URL requests are resolved against.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request's path segments against the base URL.
    fn url_for(&self, request: &ApiRequest) -> Result<Url, ClientError> {
        for segment in &request.segments {
            check_path_segment(segment)?;
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::Config(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    fn classify(&self, err: &reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: ApiRequest) -> Result<serde_json::Value, ClientError> {
        let url = self.url_for(&request)?;
        tracing::debug!(%url, query = ?request.query, "catalog API request");

        let response = self
            .client
            .get(url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(&e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
