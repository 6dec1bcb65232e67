//! Client error types

use shared::error::{ApiErrorBody, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a `{ success: false, error, code }` envelope
    #[error("{message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (raised locally or by a non-envelope 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file access (session store, queued uploads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Build an error from a non-success status and its raw body.
    ///
    /// The JSON envelope is preferred; bodies that are not an envelope fall
    /// back to a variant chosen by status.
    pub fn from_response(status: http::StatusCode, body: &[u8]) -> Self {
        if let Ok(envelope) = serde_json::from_slice::<ApiErrorBody>(body) {
            let err = envelope.into_app_error();
            return ClientError::Api {
                status: status.as_u16(),
                code: err.code,
                message: err.message,
            };
        }

        let text = String::from_utf8_lossy(body).to_string();
        match status {
            http::StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
            http::StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            http::StatusCode::NOT_FOUND => ClientError::NotFound(text),
            http::StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(text),
        }
    }

    /// Server error code, when the failure came from an envelope
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_maps_to_typed_code() {
        let body = br#"{"success":false,"error":"Document not found","code":6001}"#;
        let err = ClientError::from_response(http::StatusCode::NOT_FOUND, body);
        assert_eq!(err.code(), Some(ErrorCode::DocumentNotFound));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Document not found");
    }

    #[test]
    fn plain_body_falls_back_on_status() {
        let err = ClientError::from_response(http::StatusCode::FORBIDDEN, b"nope");
        assert!(matches!(err, ClientError::Forbidden(ref m) if m == "nope"));
        assert_eq!(err.code(), None);
    }
}
