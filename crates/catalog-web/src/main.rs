//! Entry point for the Server Catalog view server.
//!
//! Loads configuration from the environment, initializes logging, connects
//! the API client to the upstream catalog, loads the view templates, and
//! serves the route table until `Ctrl-C`.

use std::sync::Arc;

use anyhow::Context;
use catalog_client::{ApiClient, HttpTransport};
use catalog_web::{AppState, LogFormat, ViewEngine, WebConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, client construction, template
/// loading, or the server itself fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WebConfig::from_env().context("failed to load configuration")?;
    init_tracing(config.log_format);

    info!(
        api_url = config.client.base_url,
        timeout_ms = config.client.timeout.as_millis(),
        page_size = config.page_size,
        templates_dir = config.templates_dir.as_deref().unwrap_or("(embedded)"),
        "configuration loaded"
    );

    let transport =
        HttpTransport::new(&config.client).context("failed to build catalog API client")?;

    let views = match &config.templates_dir {
        Some(dir) => ViewEngine::from_dir(dir),
        None => ViewEngine::embedded(),
    }
    .context("failed to load view templates")?;

    let state = Arc::new(AppState::new(
        ApiClient::new(transport),
        views,
        config.page_size,
    ));

    start_server(&config.server, state)
        .await
        .context("view server failed")?;

    Ok(())
}

/// Initialize structured logging. `RUST_LOG` controls the filter
/// (default `info`).
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
