//! Document metadata operations
//!
//! Payload bytes live in `document_blob`; a document points at its blob by
//! hash. Inserting and deleting a document keep the blob table consistent
//! within one transaction.

use shared::models::Document;
use shared::util::millis_to_datetime;
use sqlx::{Executor, Sqlite, SqlitePool};

use super::blobs;

const COLUMNS: &str = "id, filename, file_type, size, upload_date, uploaded_by, uploaded_by_name, \
     category, file_url, title, description, blob_hash";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DocumentRow {
    pub id: i64,
    pub filename: String,
    pub file_type: String,
    pub size: i64,
    pub upload_date: i64,
    pub uploaded_by: i64,
    pub uploaded_by_name: String,
    pub category: String,
    pub file_url: String,
    pub title: String,
    pub description: String,
    pub blob_hash: Option<String>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id.to_string(),
            filename: row.filename,
            file_type: row.file_type,
            size: row.size.max(0) as u64,
            upload_date: millis_to_datetime(row.upload_date),
            uploaded_by: row.uploaded_by.to_string(),
            uploaded_by_name: row.uploaded_by_name,
            category: row.category,
            file_url: row.file_url,
            title: row.title,
            description: row.description,
            has_file_data: row.blob_hash.is_some(),
        }
    }
}

/// Validated document ready to persist
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub file_type: String,
    pub size: i64,
    pub upload_date: i64,
    pub uploaded_by: i64,
    pub uploaded_by_name: String,
    pub category: String,
    pub file_url: String,
    pub title: String,
    pub description: String,
}

/// Decoded payload and its content hash
#[derive(Debug, Clone)]
pub struct BlobRef<'a> {
    pub hash: &'a str,
    pub data: &'a [u8],
}

/// Listing / search criteria. `None` means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Restrict to documents uploaded by this user
    pub owner: Option<i64>,
    /// Case-insensitive substring over filename, category and title
    pub text: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Inclusive upload-date bounds (epoch millis)
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Insert a document and, if present, its payload, atomically.
pub async fn insert(
    pool: &SqlitePool,
    doc: &NewDocument,
    blob: Option<BlobRef<'_>>,
) -> Result<DocumentRow, sqlx::Error> {
    let id = shared::util::snowflake_id();
    let mut tx = pool.begin().await?;

    if let Some(blob) = &blob {
        blobs::insert_if_absent(&mut *tx, blob.hash, blob.data, doc.upload_date).await?;
    }

    sqlx::query(
        "INSERT INTO document (id, filename, file_type, size, upload_date, uploaded_by, uploaded_by_name, category, file_url, title, description, blob_hash, \
         filename_folded, category_folded, title_folded) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&doc.filename)
    .bind(&doc.file_type)
    .bind(doc.size)
    .bind(doc.upload_date)
    .bind(doc.uploaded_by)
    .bind(&doc.uploaded_by_name)
    .bind(&doc.category)
    .bind(&doc.file_url)
    .bind(&doc.title)
    .bind(&doc.description)
    .bind(blob.as_ref().map(|b| b.hash))
    .bind(fold(&doc.filename))
    .bind(fold(&doc.category))
    .bind(fold(&doc.title))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(DocumentRow {
        id,
        filename: doc.filename.clone(),
        file_type: doc.file_type.clone(),
        size: doc.size,
        upload_date: doc.upload_date,
        uploaded_by: doc.uploaded_by,
        uploaded_by_name: doc.uploaded_by_name.clone(),
        category: doc.category.clone(),
        file_url: doc.file_url.clone(),
        title: doc.title.clone(),
        description: doc.description.clone(),
        blob_hash: blob.map(|b| b.hash.to_string()),
    })
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<DocumentRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, DocumentRow>(&format!("SELECT {COLUMNS} FROM document WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Documents matching `filter`, newest upload first
pub async fn search<'e, E>(executor: E, filter: &SearchFilter) -> Result<Vec<DocumentRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let pattern = filter
        .text
        .as_deref()
        .map(|t| format!("%{}%", escape_like(&fold(t))));

    sqlx::query_as::<_, DocumentRow>(&format!(
        "SELECT {COLUMNS} FROM document \
         WHERE (?1 IS NULL OR uploaded_by = ?1) \
           AND (?2 IS NULL OR filename_folded LIKE ?2 ESCAPE '\\' \
                OR category_folded LIKE ?2 ESCAPE '\\' \
                OR title_folded LIKE ?2 ESCAPE '\\') \
           AND (?3 IS NULL OR category = ?3) \
           AND (?4 IS NULL OR upload_date >= ?4) \
           AND (?5 IS NULL OR upload_date <= ?5) \
         ORDER BY upload_date DESC, id DESC"
    ))
    .bind(filter.owner)
    .bind(pattern)
    .bind(filter.category.as_deref())
    .bind(filter.start)
    .bind(filter.end)
    .fetch_all(executor)
    .await
}

/// Delete a document and drop its blob if nothing else references it.
/// Returns the deleted row, or `None` when the id does not exist.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<Option<DocumentRow>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(row) = find_by_id(&mut *tx, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM document WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if let Some(hash) = &row.blob_hash {
        blobs::delete_if_unreferenced(&mut *tx, hash).await?;
    }

    tx.commit().await?;
    Ok(Some(row))
}

/// Sum of declared sizes over all documents
pub async fn total_size<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COALESCE(SUM(size), 0) FROM document")
        .fetch_one(executor)
        .await
}

/// Case folding shared by stored search columns and query text
fn fold(raw: &str) -> String {
    raw.to_lowercase()
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
