//! Document Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound for a single file, both declared and decoded (500 MiB)
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Default `fileType` when the uploader does not supply one
pub const DEFAULT_FILE_TYPE: &str = "unknown";

/// Default `category` when the uploader does not supply one
pub const DEFAULT_CATEGORY: &str = "general";

/// Document metadata as returned by the API.
///
/// The payload itself is only served through the view/download routes;
/// `has_file_data` tells the client whether those routes will succeed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub file_type: String,
    pub size: u64,
    pub upload_date: DateTime<Utc>,
    pub uploaded_by: String,
    pub uploaded_by_name: String,
    pub category: String,
    pub file_url: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub has_file_data: bool,
}

/// Single upload payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub size: Option<u64>,
    pub category: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Base64 payload, optionally as a `data:<mime>;base64,` URL
    pub file_data: Option<String>,
}

/// One entry of a batch upload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadItem {
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub size: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_data: Option<String>,
}

/// Batch upload payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadRequest {
    pub documents: Option<Vec<BatchUploadItem>>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub category: Option<String>,
}

/// Batch upload result: created documents plus per-entry failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUploadResponse {
    pub documents: Vec<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub document: Document,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
}

/// Search query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSearchQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
