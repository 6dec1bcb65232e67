//! Pending-upload queue shared by both dashboards

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::models::{
    ActivityLogCreate, BatchUploadItem, BatchUploadRequest, DEFAULT_CATEGORY, Document, UserInfo,
};

use crate::api::DocVaultClient;
use crate::client::HttpClient;
use crate::{ClientError, ClientResult};

/// A file selected for upload but not yet submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub id: u64,
    pub filename: String,
    pub file_type: String,
    pub title: String,
    pub description: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    /// `data:<mime>;base64,<body>`; empty files travel without a payload
    pub fn data_url(&self) -> Option<String> {
        if self.bytes.is_empty() {
            return None;
        }
        Some(format!(
            "data:{};base64,{}",
            self.file_type,
            STANDARD.encode(&self.bytes)
        ))
    }

    fn to_item(&self) -> BatchUploadItem {
        BatchUploadItem {
            filename: Some(self.filename.clone()),
            file_type: Some(self.file_type.clone()),
            size: Some(self.bytes.len() as u64),
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.clone()),
            file_data: self.data_url(),
        }
    }
}

/// Result of a submitted batch
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub documents: Vec<Document>,
    /// Per-file failures reported by the server for an otherwise successful batch
    pub warnings: Vec<String>,
}

impl UploadOutcome {
    pub fn summary(&self) -> String {
        let n = self.documents.len();
        format!(
            "Successfully uploaded {n} document{}!",
            if n == 1 { "" } else { "s" }
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    files: Vec<PendingFile>,
    next_id: u64,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Queue in-memory bytes. The title defaults to the filename without its
    /// extension and the type is guessed from the extension.
    pub fn add_bytes(&mut self, filename: &str, bytes: Vec<u8>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let title = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.files.push(PendingFile {
            id,
            filename: filename.to_string(),
            file_type: mime_guess::from_path(filename)
                .first_or_octet_stream()
                .to_string(),
            title,
            description: String::new(),
            bytes,
        });
        id
    }

    /// Read a file from disk into the queue
    pub async fn add_path(&mut self, path: impl AsRef<Path>) -> ClientResult<u64> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ClientError::Validation(format!("Not a file: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        Ok(self.add_bytes(&filename, bytes))
    }

    pub fn set_title(&mut self, id: u64, title: &str) {
        if let Some(file) = self.files.iter_mut().find(|f| f.id == id) {
            file.title = title.to_string();
        }
    }

    pub fn set_description(&mut self, id: u64, description: &str) {
        if let Some(file) = self.files.iter_mut().find(|f| f.id == id) {
            file.description = description.to_string();
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.files.retain(|f| f.id != id);
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Checks run before anything is sent
    pub fn validate(&self) -> ClientResult<()> {
        if self.files.is_empty() {
            return Err(ClientError::Validation(
                "Please select at least one file".into(),
            ));
        }
        if self.files.iter().any(|f| f.title.trim().is_empty()) {
            return Err(ClientError::Validation(
                "Please add a title for all selected documents".into(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self, user: &UserInfo, category: Option<&str>) -> BatchUploadRequest {
        BatchUploadRequest {
            documents: Some(self.files.iter().map(PendingFile::to_item).collect()),
            user_id: Some(user.id.clone()),
            user_name: Some(user.name.clone()),
            category: Some(category.unwrap_or(DEFAULT_CATEGORY).to_string()),
        }
    }
}

/// Validate, send the batch, then record one `upload` activity.
///
/// The queue is emptied only when the server accepted at least one file.
/// A failed activity write is logged and otherwise ignored.
pub async fn submit_queue<C: HttpClient>(
    client: &DocVaultClient<C>,
    user: &UserInfo,
    queue: &mut UploadQueue,
) -> ClientResult<UploadOutcome> {
    queue.validate()?;
    let resp = client.batch_upload(&queue.to_request(user, None)).await?;
    queue.clear();

    let entry = ActivityLogCreate {
        user_id: Some(user.id.clone()),
        user_name: Some(user.name.clone()),
        action: Some("upload".into()),
        document_name: Some(format!("{} documents", resp.documents.len())),
        ..Default::default()
    };
    if let Err(e) = client.log_activity(&entry).await {
        tracing::warn!(error = %e, "Failed to log upload activity");
    }

    let warnings = resp.errors.unwrap_or_default();
    if !warnings.is_empty() {
        tracing::warn!(failed = warnings.len(), "Some files failed: {}", warnings.join(", "));
    }
    Ok(UploadOutcome {
        documents: resp.documents,
        warnings,
    })
}
