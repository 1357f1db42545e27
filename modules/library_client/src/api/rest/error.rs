//! Mapping of HTTP failures to contract errors

use super::dto::BackendErrorDto;
use crate::contract::LibraryError;

/// Map a transport-level failure
pub fn map_transport_error(error: reqwest::Error) -> LibraryError {
    if error.is_decode() {
        return LibraryError::Decode {
            message: error.to_string(),
        };
    }
    LibraryError::Transport {
        message: error.to_string(),
    }
}

/// Map a non-success response.
///
/// The backend reports failures as `{"error": "..."}`; that message is used
/// when present, otherwise the raw body (or the canonical reason phrase).
pub fn map_status_error(status: reqwest::StatusCode, body: &str) -> LibraryError {
    let message = serde_json::from_str::<BackendErrorDto>(body)
        .map(|e| e.error)
        .ok()
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        });

    LibraryError::Status {
        status: status.as_u16(),
        message,
    }
}

pub fn map_decode_error(error: serde_json::Error) -> LibraryError {
    LibraryError::Decode {
        message: error.to_string(),
    }
}
