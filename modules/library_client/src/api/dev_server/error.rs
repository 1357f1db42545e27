//! Dev server errors as RFC-9457 Problem Details

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details document
#[derive(Debug, Serialize)]
pub struct Problem {
    /// Problem type; points at the status description
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short summary, stable per problem type
    pub title: String,

    pub status: u16,

    /// What went wrong for this request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

/// The backend could not be reached or its response could not be read
pub fn map_upstream_error(error: reqwest::Error, path: &str) -> Problem {
    tracing::warn!(error = %error, path, "Proxy request to backend failed");
    let (status, title) = if error.is_timeout() {
        (StatusCode::GATEWAY_TIMEOUT, "Backend Timeout")
    } else {
        (StatusCode::BAD_GATEWAY, "Backend Unavailable")
    };
    Problem::new(status, title)
        .with_detail(error.to_string())
        .with_instance(path)
}

/// The incoming request body could not be buffered
pub fn map_body_error(error: axum::Error, path: &str) -> Problem {
    Problem::new(StatusCode::PAYLOAD_TOO_LARGE, "Request Body Rejected")
        .with_detail(error.to_string())
        .with_instance(path)
}

pub fn not_found(path: &str) -> Problem {
    Problem::new(StatusCode::NOT_FOUND, "Not Found")
        .with_detail(format!("No asset or route matches '{}'", path))
        .with_instance(path)
}
