//! Configuration for the view server binary.
//!
//! All configuration is loaded from environment variables. The server
//! needs to know where to listen, how to reach the upstream catalog, the
//! default page size, and optionally where to find override templates.

use catalog_client::ClientConfig;
use catalog_types::DEFAULT_PAGE_SIZE;

use crate::error::WebError;
use crate::server::ServerConfig;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Complete configuration for the view server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Listen address.
    pub server: ServerConfig,
    /// Upstream catalog API settings.
    pub client: ClientConfig,
    /// Page size when a request does not specify `limit`.
    pub page_size: u32,
    /// Directory of override templates, if any.
    pub templates_dir: Option<String>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `CATALOG_HOST` -- bind host (default `0.0.0.0`)
    /// - `CATALOG_PORT` -- bind port (default 3000)
    /// - `CATALOG_API_URL` -- upstream catalog base URL
    /// - `CATALOG_API_TIMEOUT_MS` -- upstream request timeout (default 10000)
    /// - `CATALOG_PAGE_SIZE` -- default page size (default 20)
    /// - `CATALOG_TEMPLATES_DIR` -- directory of override templates
    /// - `CATALOG_LOG_FORMAT` -- `text` or `json` (default `text`)
    pub fn from_env() -> Result<Self, WebError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WebError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client =
            ClientConfig::from_lookup(&lookup).map_err(|e| WebError::Config(e.to_string()))?;

        let defaults = ServerConfig::default();
        let host = lookup("CATALOG_HOST").unwrap_or(defaults.host);
        let port = parse_or("CATALOG_PORT", lookup("CATALOG_PORT"), defaults.port)?;
        let page_size = parse_or(
            "CATALOG_PAGE_SIZE",
            lookup("CATALOG_PAGE_SIZE"),
            DEFAULT_PAGE_SIZE,
        )?;
        if page_size == 0 {
            return Err(WebError::Config(
                "CATALOG_PAGE_SIZE must be positive".to_owned(),
            ));
        }

        let templates_dir = lookup("CATALOG_TEMPLATES_DIR").filter(|dir| !dir.is_empty());

        let log_format = match lookup("CATALOG_LOG_FORMAT").as_deref().map(str::to_lowercase) {
            None => LogFormat::Text,
            Some(format) => match format.as_str() {
                "" | "text" | "pretty" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => {
                    return Err(WebError::Config(format!(
                        "unknown CATALOG_LOG_FORMAT: {other}"
                    )));
                }
            },
        };

        Ok(Self {
            server: ServerConfig { host, port },
            client,
            page_size,
            templates_dir,
            log_format,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<V>(name: &str, raw: Option<String>, default: V) -> Result<V, WebError>
where
    V: core::str::FromStr,
    V::Err: core::fmt::Display,
{
    raw.map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| WebError::Config(format!("invalid {name}: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = WebConfig::from_lookup(lookup_from(&[]));
        assert!(config.is_ok());
        let Ok(config) = config else { return };
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.client, ClientConfig::default());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.templates_dir, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_from_lookup() {
        let config = WebConfig::from_lookup(lookup_from(&[
            ("CATALOG_HOST", "127.0.0.1"),
            ("CATALOG_PORT", "8088"),
            ("CATALOG_API_URL", "https://registry.example/api"),
            ("CATALOG_API_TIMEOUT_MS", "500"),
            ("CATALOG_PAGE_SIZE", "50"),
            ("CATALOG_TEMPLATES_DIR", "/srv/templates"),
            ("CATALOG_LOG_FORMAT", "JSON"),
        ]));
        assert!(config.is_ok());
        let Ok(config) = config else { return };
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.client.base_url, "https://registry.example/api");
        assert_eq!(config.client.timeout, Duration::from_millis(500));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.templates_dir.as_deref(), Some("/srv/templates"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_invalid_values() {
        for vars in [
            [("CATALOG_PORT", "eighty")],
            [("CATALOG_PAGE_SIZE", "0")],
            [("CATALOG_LOG_FORMAT", "xml")],
            [("CATALOG_API_TIMEOUT_MS", "-1")],
        ] {
            let result = WebConfig::from_lookup(lookup_from(&vars));
            assert!(matches!(result, Err(WebError::Config(_))), "{vars:?}");
        }
    }
}
