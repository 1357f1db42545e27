//! Dev server request handlers

use super::error::{map_body_error, map_upstream_error, not_found, Problem};
use crate::domain::RouteTable;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName},
    response::{Html, IntoResponse, Response},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Largest request body forwarded to the backend
pub const MAX_PROXY_BODY: usize = 64 * 1024 * 1024;

/// Connection-scoped headers that must not be forwarded
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
];

/// Shared state of the dev server
#[derive(Clone)]
pub struct DevServerState {
    pub http: reqwest::Client,
    /// Backend origin without a trailing slash
    pub backend_url: String,
    pub routes: Arc<RouteTable>,
    pub static_dir: Option<PathBuf>,
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // Headers named in `Connection` are connection-scoped as well.
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in HOP_BY_HOP.iter().chain(named.iter()) {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

/// Forward the request to the backend and relay its response
pub async fn proxy(
    State(state): State<DevServerState>,
    request: Request,
) -> Result<Response, Problem> {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("{}{}", state.backend_url, path_and_query);

    let body = axum::body::to_bytes(body, MAX_PROXY_BODY)
        .await
        .map_err(|e| map_body_error(e, &path))?;

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);

    tracing::debug!(method = %parts.method, %target, "Proxying request");
    let upstream = state
        .http
        .request(parts.method, &target)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| map_upstream_error(e, &path))?;

    let status = upstream.status();
    let mut response_headers = upstream.headers().clone();
    strip_hop_by_hop(&mut response_headers);
    response_headers.remove(header::CONTENT_LENGTH);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

/// Serve built frontend assets.
///
/// Client routes get `index.html` so the history router can take over;
/// everything else is looked up in the static directory.
pub async fn serve_static(State(state): State<DevServerState>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    let Some(dir) = state.static_dir.as_ref() else {
        return not_found(&path).into_response();
    };

    if state.routes.resolve(&path).is_some() {
        return match tokio::fs::read_to_string(dir.join("index.html")).await {
            Ok(index) => Html(index).into_response(),
            Err(e) => {
                tracing::warn!(error = %e, dir = %dir.display(), "index.html missing from static dir");
                not_found(&path).into_response()
            }
        };
    }

    match ServeDir::new(dir).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
