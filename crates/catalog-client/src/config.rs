//! Configuration for the catalog API client.
//!
//! Values come from environment variables. Loading goes through a lookup
//! function so callers (and tests) can supply their own source.

use std::time::Duration;

use crate::error::ClientError;

/// Base URL used when `CATALOG_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

/// Request timeout used when `CATALOG_API_TIMEOUT_MS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Connection settings for the upstream catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (e.g. `http://host/api`).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// Optional variables:
    /// - `CATALOG_API_URL` -- upstream base URL (default [`DEFAULT_BASE_URL`])
    /// - `CATALOG_API_TIMEOUT_MS` -- request timeout in milliseconds (default 10000)
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CATALOG_API_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let timeout = match lookup("CATALOG_API_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.parse().map_err(|e| {
                ClientError::Config(format!("invalid CATALOG_API_TIMEOUT_MS: {e}"))
            })?),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }
}
