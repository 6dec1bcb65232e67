//! HTTP transports
//!
//! [`HttpClient`] is the seam between the typed API and the wire:
//! [`NetworkHttpClient`] talks to a running server over reqwest,
//! [`OneshotHttpClient`] drives an in-process axum `Router`.

mod http;
mod http_oneshot;

pub use self::http::{HttpClient, NetworkHttpClient};
pub use self::http_oneshot::OneshotHttpClient;

use crate::{ClientError, ClientResult};

/// Raw bytes served by the view/download routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBody {
    pub content_type: Option<String>,
    /// Filename from `Content-Disposition`, present on downloads
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileBody {
    pub(crate) fn from_parts(headers: &::http::HeaderMap, bytes: Vec<u8>) -> Self {
        let header = |name: ::http::header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            content_type: header(::http::header::CONTENT_TYPE),
            filename: header(::http::header::CONTENT_DISPOSITION)
                .as_deref()
                .and_then(disposition_filename),
            bytes,
        }
    }
}

/// Extract `filename="..."` from a Content-Disposition value
fn disposition_filename(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
    })
}

/// Append query parameters to an API path, percent-encoding the values.
pub(crate) fn with_query(path: &str, params: &[(&str, String)]) -> ClientResult<String> {
    if params.is_empty() {
        return Ok(path.to_string());
    }
    let url = reqwest::Url::parse_with_params(&format!("http://docvault.local{path}"), params)
        .map_err(|e| ClientError::Internal(format!("Invalid request path {path}: {e}")))?;
    Ok(match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    })
}
