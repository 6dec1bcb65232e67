//! Document ingest: single and batch uploads
//!
//! Both paths validate metadata, decode the payload once, and persist the
//! document together with its content-addressed blob. A batch processes each
//! entry independently; failures are collected as human-readable strings and
//! never abort the remaining entries.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    BatchUploadItem, BatchUploadRequest, BatchUploadResponse, DEFAULT_CATEGORY, DEFAULT_FILE_TYPE,
    Document, DocumentUpload, MAX_FILE_SIZE,
};
use sqlx::SqlitePool;

use crate::db::documents::{self, BlobRef, NewDocument};
use crate::error::ServiceResult;
use crate::payload::{self, DecodedPayload};
use crate::util::required;

const MIB: f64 = 1024.0 * 1024.0;

/// Uploader identity shared by every entry of a request
struct Uploader<'a> {
    id: i64,
    name: &'a str,
}

/// Replace every character outside `[A-Za-z0-9.-]` with `-`
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn too_large_line(filename: &str, size: u64) -> String {
    format!("{filename}: File too large ({:.2} MB)", size as f64 / MIB)
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    shared::util::parse_id(raw).ok_or_else(|| AppError::validation("Invalid userId"))
}

fn decode_optional(raw: Option<&str>) -> Result<Option<DecodedPayload>, AppError> {
    if payload::has_payload(raw) {
        raw.map(payload::ingest).transpose()
    } else {
        Ok(None)
    }
}

/// Declared size wins; an absent or zero declaration falls back to the decoded length
fn effective_size(declared: Option<u64>, decoded: Option<&DecodedPayload>) -> i64 {
    let size = match (declared, decoded) {
        (Some(s), _) if s > 0 => s,
        (_, Some(p)) => p.len(),
        _ => 0,
    };
    size.min(i64::MAX as u64) as i64
}

fn non_blank_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    required(value).unwrap_or(fallback)
}

async fn persist(
    pool: &SqlitePool,
    doc: &NewDocument,
    decoded: Option<&DecodedPayload>,
) -> Result<Document, sqlx::Error> {
    let blob = decoded.map(|p| BlobRef {
        hash: &p.hash,
        data: &p.bytes,
    });
    let row = documents::insert(pool, doc, blob).await?;
    Ok(row.into())
}

/// Accept one document
pub async fn ingest_one(pool: &SqlitePool, upload: &DocumentUpload) -> ServiceResult<Document> {
    let (Some(filename), Some(user_id), Some(user_name), Some(title)) = (
        required(&upload.filename),
        required(&upload.user_id),
        required(&upload.user_name),
        required(&upload.title),
    ) else {
        return Err(AppError::validation(
            "Missing required fields: filename, userId, userName, title",
        )
        .into());
    };
    let uploader = Uploader {
        id: parse_user_id(user_id)?,
        name: user_name,
    };

    if let Some(size) = upload.size.filter(|s| *s > MAX_FILE_SIZE) {
        return Err(AppError::file_too_large(size).into());
    }

    let decoded = decode_optional(upload.file_data.as_deref())?;
    if decoded.is_none() {
        tracing::warn!(filename, uploader = uploader.name, "Document uploaded without file data");
    }

    let now = shared::util::now_millis();
    let doc = NewDocument {
        filename: filename.to_string(),
        file_type: non_blank_or(&upload.file_type, DEFAULT_FILE_TYPE).to_string(),
        size: effective_size(upload.size, decoded.as_ref()),
        upload_date: now,
        uploaded_by: uploader.id,
        uploaded_by_name: uploader.name.to_string(),
        category: non_blank_or(&upload.category, DEFAULT_CATEGORY).to_string(),
        file_url: format!("/uploads/{now}-{filename}"),
        title: title.to_string(),
        description: upload.description.clone().unwrap_or_default(),
    };

    let document = persist(pool, &doc, decoded.as_ref()).await?;
    tracing::info!(
        document_id = %document.id,
        title = %document.title,
        uploader = uploader.name,
        "Document uploaded"
    );
    Ok(document)
}

/// Validate and store a single batch entry, returning the failure line on error
async fn ingest_entry(
    pool: &SqlitePool,
    item: &BatchUploadItem,
    uploader: &Uploader<'_>,
    category: &str,
) -> Result<Document, String> {
    let (Some(filename), Some(title)) = (required(&item.filename), required(&item.title)) else {
        let name = required(&item.filename).unwrap_or("Unknown");
        return Err(format!("{name}: Missing title or filename"));
    };

    if let Some(size) = item.size.filter(|s| *s > MAX_FILE_SIZE) {
        return Err(too_large_line(filename, size));
    }

    let decoded = match decode_optional(item.file_data.as_deref()) {
        Ok(decoded) => decoded,
        Err(e) if e.code == ErrorCode::FileTooLarge => {
            let size = e
                .details
                .as_ref()
                .and_then(|d| d.get("size"))
                .and_then(|v| v.as_u64())
                .unwrap_or_default();
            return Err(too_large_line(filename, size));
        }
        Err(_) => return Err(format!("{filename}: Invalid file data")),
    };
    if decoded.is_none() {
        tracing::warn!(filename, uploader = uploader.name, "Batch entry uploaded without file data");
    }

    let now = shared::util::now_millis();
    let doc = NewDocument {
        filename: filename.to_string(),
        file_type: non_blank_or(&item.file_type, DEFAULT_FILE_TYPE).to_string(),
        size: effective_size(item.size, decoded.as_ref()),
        upload_date: now,
        uploaded_by: uploader.id,
        uploaded_by_name: uploader.name.to_string(),
        category: category.to_string(),
        file_url: format!("/api/documents/download/{now}-{}", sanitize_filename(filename)),
        title: title.to_string(),
        description: item.description.clone().unwrap_or_default(),
    };

    persist(pool, &doc, decoded.as_ref()).await.map_err(|e| {
        tracing::error!(filename, error = %e, "Failed to store batch entry");
        format!("{filename}: Upload failed")
    })
}

/// Accept many documents for one uploader.
///
/// Succeeds when at least one entry was stored; otherwise fails with
/// `BatchUploadFailed` carrying every collected error.
pub async fn batch_upload(
    pool: &SqlitePool,
    request: &BatchUploadRequest,
) -> ServiceResult<BatchUploadResponse> {
    let items = match request.documents.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AppError::new(ErrorCode::NoFileProvided).into()),
    };

    let (Some(user_id), Some(user_name)) = (required(&request.user_id), required(&request.user_name))
    else {
        return Err(AppError::validation("Missing userId or userName").into());
    };
    let uploader = Uploader {
        id: parse_user_id(user_id)?,
        name: user_name,
    };
    let category = non_blank_or(&request.category, DEFAULT_CATEGORY);

    let mut stored = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for item in items {
        match ingest_entry(pool, item, &uploader, category).await {
            Ok(document) => stored.push(document),
            Err(line) => errors.push(line),
        }
    }

    tracing::info!(
        uploader = uploader.name,
        stored = stored.len(),
        failed = errors.len(),
        "Batch upload processed"
    );

    if stored.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::BatchUploadFailed,
            format!("Failed to upload documents: {}", errors.join(", ")),
        )
        .into());
    }

    Ok(BatchUploadResponse {
        documents: stored,
        errors: (!errors.is_empty()).then_some(errors),
    })
}
