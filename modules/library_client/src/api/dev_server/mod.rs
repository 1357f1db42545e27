//! Development server: proxies backend paths and serves frontend assets

pub mod error;
pub mod handlers;
pub mod routes;

pub use routes::build_router;

use crate::config::DevServerConfig;
use crate::domain::RouteTable;
use anyhow::Context;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// HTTP client for proxied requests.
///
/// Redirects are relayed to the browser rather than followed.
pub fn proxy_client(connect_timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// Run the dev server until `cancel` fires
pub async fn serve(
    config: &DevServerConfig,
    http: reqwest::Client,
    routes: RouteTable,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let router = build_router(config, http, routes)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind dev server to {}", addr))?;

    tracing::info!(
        %addr,
        backend = %config.backend_url,
        prefixes = ?config.proxy_prefixes,
        "Dev server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("dev server failed")?;

    tracing::info!("Dev server stopped");
    Ok(())
}
