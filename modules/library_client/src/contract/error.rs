//! Contract error types for the library client
//!
//! These errors are transport-agnostic; callers match on them without
//! depending on the HTTP library.

/// Library client errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// The request never produced a response (connection, timeout, ...)
    Transport {
        /// Underlying error message
        message: String,
    },
    /// The backend answered with a non-success status
    Status {
        /// HTTP status code
        status: u16,
        /// Backend error message, or the raw body
        message: String,
    },
    /// The response body could not be decoded
    Decode {
        /// Decoding error details
        message: String,
    },
    /// A URL could not be built from the configured base
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Error details
        details: String,
    },
}

impl LibraryError {
    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { message } => {
                write!(f, "Request failed: {}", message)
            }
            Self::Status { status, message } => {
                write!(f, "Backend returned {}: {}", status, message)
            }
            Self::Decode { message } => {
                write!(f, "Invalid response body: {}", message)
            }
            Self::InvalidUrl { url, details } => {
                write!(f, "Invalid URL '{}': {}", url, details)
            }
        }
    }
}

impl std::error::Error for LibraryError {}
