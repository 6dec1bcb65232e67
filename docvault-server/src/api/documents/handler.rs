//! Document API Handlers

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use chrono::{DateTime, NaiveDate};
use http::header;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    BatchUploadRequest, BatchUploadResponse, DocumentListResponse, DocumentResponse,
    DocumentSearchQuery, DocumentUpload, Empty,
};

use crate::api::{ApiResult, AppJson};
use crate::auth::{Caller, Visibility};
use crate::db::documents::{self, DocumentRow, SearchFilter};
use crate::db::blobs;
use crate::error::{ServiceError, ServiceResult};
use crate::payload::serve_content_type;
use crate::services::upload;
use crate::state::AppState;

fn document_not_found() -> AppError {
    AppError::new(ErrorCode::DocumentNotFound)
}

fn parse_document_id(raw: &str) -> Result<i64, AppError> {
    shared::util::parse_id(raw).ok_or_else(document_not_found)
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC)
fn parse_date_bound(field: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.timestamp_millis()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc().timestamp_millis()))
        .ok_or_else(|| AppError::validation(format!("Invalid {field}: {raw}")))
}

/// Apply the caller's visibility to a filter; `None` means the caller sees nothing
fn scoped(caller: &Caller, filter: SearchFilter) -> Option<SearchFilter> {
    match caller.visibility() {
        Visibility::All => Some(filter),
        Visibility::OwnedBy(user_id) => Some(SearchFilter {
            owner: Some(user_id),
            ..filter
        }),
        Visibility::Nothing => None,
    }
}

async fn run_search(state: &AppState, filter: Option<SearchFilter>) -> ApiResult<DocumentListResponse> {
    let documents = match filter {
        Some(filter) => documents::search(state.pool(), &filter).await?,
        None => Vec::new(),
    };
    Ok(ApiResponse::success(DocumentListResponse {
        documents: documents.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/documents/upload
pub async fn upload(
    State(state): State<AppState>,
    AppJson(req): AppJson<DocumentUpload>,
) -> ApiResult<DocumentResponse> {
    let document = upload::ingest_one(state.pool(), &req).await?;
    Ok(ApiResponse::success(DocumentResponse { document }))
}

/// POST /api/documents/batch-upload
pub async fn batch_upload(
    State(state): State<AppState>,
    AppJson(req): AppJson<BatchUploadRequest>,
) -> ApiResult<BatchUploadResponse> {
    let response = upload::batch_upload(state.pool(), &req).await?;
    Ok(ApiResponse::success(response))
}

/// GET /api/documents
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<DocumentListResponse> {
    run_search(&state, scoped(&caller, SearchFilter::default())).await
}

/// GET /api/documents/search/query
pub async fn search(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<DocumentSearchQuery>,
) -> ApiResult<DocumentListResponse> {
    let filter = SearchFilter {
        owner: None,
        text: query.query.filter(|q| !q.trim().is_empty()),
        category: query.category.filter(|c| !c.is_empty()),
        start: parse_date_bound("startDate", query.start_date.as_deref())?,
        end: parse_date_bound("endDate", query.end_date.as_deref())?,
    };
    run_search(&state, scoped(&caller, filter)).await
}

/// GET /api/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DocumentResponse> {
    let id = parse_document_id(&id)?;
    let row = documents::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(document_not_found)?;
    Ok(ApiResponse::success(DocumentResponse {
        document: row.into(),
    }))
}

/// DELETE /api/documents/{id} (admin only)
pub async fn delete(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Empty> {
    caller.require_admin()?;
    let id = parse_document_id(&id)?;

    let row = documents::delete(state.pool(), id)
        .await?
        .ok_or_else(document_not_found)?;
    tracing::info!(document_id = row.id, title = %row.title, "Document deleted");
    Ok(ApiResponse::success(Empty {}))
}

/// Load a document and its stored bytes
async fn load_payload(state: &AppState, raw_id: &str) -> ServiceResult<(DocumentRow, Vec<u8>)> {
    let id = parse_document_id(raw_id)?;
    let row = documents::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(document_not_found)?;

    let Some(hash) = row.blob_hash.as_deref() else {
        tracing::warn!(document_id = row.id, filename = %row.filename, "Document has no file data");
        return Err(AppError::new(ErrorCode::NoFileData).into());
    };
    let Some(bytes) = blobs::fetch(state.pool(), hash).await? else {
        tracing::error!(document_id = row.id, %hash, "Document blob is missing");
        return Err(AppError::new(ErrorCode::NoFileData).into());
    };
    Ok((row, bytes))
}

/// Quote-safe ASCII rendition of a filename for `Content-Disposition`
fn disposition_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| *c != '"' && *c != '\\')
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
        .collect()
}

/// GET /api/documents/view/{id}
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let (row, bytes) = load_payload(&state, &id).await?;
    let content_type = serve_content_type(&row.file_type, &row.filename);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        bytes,
    ))
}

/// GET /api/documents/download/{id}
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let (row, bytes) = load_payload(&state, &id).await?;
    let content_type = serve_content_type(&row.file_type, &row.filename);
    tracing::info!(document_id = row.id, filename = %row.filename, "Document downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    disposition_filename(&row.filename)
                ),
            ),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_bounds_accept_both_formats() {
        assert_eq!(parse_date_bound("startDate", None).unwrap(), None);
        assert_eq!(parse_date_bound("startDate", Some("")).unwrap(), None);
        assert_eq!(
            parse_date_bound("startDate", Some("1970-01-02")).unwrap(),
            Some(86_400_000)
        );
        assert_eq!(
            parse_date_bound("endDate", Some("1970-01-01T00:00:01Z")).unwrap(),
            Some(1_000)
        );
        let err = parse_date_bound("endDate", Some("yesterday")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn disposition_filename_is_header_safe() {
        assert_eq!(disposition_filename("report.pdf"), "report.pdf");
        assert_eq!(disposition_filename("a\"b.txt"), "ab.txt");
        assert_eq!(disposition_filename("résumé.pdf"), "r_sum_.pdf");
    }
}
