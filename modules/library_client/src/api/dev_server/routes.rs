//! Dev server route registration

use super::handlers::{self, DevServerState};
use crate::config::DevServerConfig;
use crate::domain::RouteTable;
use axum::{routing::any, Router};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the dev server router: proxied prefixes first, static assets as fallback
pub fn build_router(
    config: &DevServerConfig,
    http: reqwest::Client,
    routes: RouteTable,
) -> anyhow::Result<Router> {
    let state = DevServerState {
        http,
        backend_url: config.backend_url.trim().trim_end_matches('/').to_string(),
        routes: Arc::new(routes),
        static_dir: config.static_dir.clone(),
    };
    url::Url::parse(&state.backend_url)
        .map_err(|e| anyhow::anyhow!("invalid backend url '{}': {}", state.backend_url, e))?;

    // Equivalent spellings ("/api", "/api/") collapse to one route.
    let prefixes = config
        .proxy_prefixes
        .iter()
        .map(|p| normalize_prefix(p))
        .collect::<anyhow::Result<BTreeSet<_>>>()?;

    let mut router = Router::new();
    for prefix in prefixes {
        router = router
            .route(&prefix, any(handlers::proxy))
            .route(&format!("{}/{{*rest}}", prefix), any(handlers::proxy));
    }

    Ok(router
        .fallback(handlers::serve_static)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn normalize_prefix(prefix: &str) -> anyhow::Result<String> {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() || !trimmed.starts_with('/') {
        anyhow::bail!("proxy prefix must be an absolute path below '/', got '{}'", prefix);
    }
    if trimmed.contains(['{', '}', '*']) {
        anyhow::bail!("proxy prefix must not contain route parameters, got '{}'", prefix);
    }
    Ok(trimmed.to_string())
}
