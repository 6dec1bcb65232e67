//! Content-addressed file payloads

use sqlx::{Executor, Sqlite};

/// Store bytes under their hash. Identical payloads are stored once.
pub async fn insert_if_absent<'e, E>(executor: E, hash: &str, data: &[u8], now: i64) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT OR IGNORE INTO document_blob (hash, data, size, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(hash)
    .bind(data)
    .bind(data.len() as i64)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn fetch<'e, E>(executor: E, hash: &str) -> Result<Option<Vec<u8>>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT data FROM document_blob WHERE hash = ?")
        .bind(hash)
        .fetch_optional(executor)
        .await
}

/// Remove the blob once no document references it. Returns true if it was removed.
pub async fn delete_if_unreferenced<'e, E>(executor: E, hash: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "DELETE FROM document_blob WHERE hash = ?1 AND NOT EXISTS (SELECT 1 FROM document WHERE blob_hash = ?1)",
    )
    .bind(hash)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    #[tokio::test]
    async fn identical_payloads_stored_once() {
        let db = test_db().await;
        insert_if_absent(&db.pool, "abc", b"hello", 1).await.unwrap();
        insert_if_absent(&db.pool, "abc", b"hello", 2).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM document_blob")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(fetch(&db.pool, "abc").await.unwrap().unwrap(), b"hello");
        assert!(fetch(&db.pool, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn referenced_blob_survives_cleanup() {
        let db = test_db().await;
        insert_if_absent(&db.pool, "h1", b"bytes", 1).await.unwrap();
        sqlx::query(
            "INSERT INTO document (id, filename, file_type, size, upload_date, uploaded_by, uploaded_by_name, category, file_url, title, blob_hash) \
             VALUES (1, 'a', 'x', 5, 1, 1, 'u', 'general', '/u', 't', 'h1')",
        )
        .execute(&db.pool)
        .await
        .unwrap();

        assert!(!delete_if_unreferenced(&db.pool, "h1").await.unwrap());

        sqlx::query("DELETE FROM document WHERE id = 1")
            .execute(&db.pool)
            .await
            .unwrap();
        assert!(delete_if_unreferenced(&db.pool, "h1").await.unwrap());
    }
}
