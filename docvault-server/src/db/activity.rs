//! Activity log operations (append-only)

use shared::models::ActivityLog;
use shared::util::millis_to_datetime;
use sqlx::{Executor, Sqlite};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub action: String,
    pub document_id: Option<i64>,
    pub document_name: Option<String>,
    pub timestamp: i64,
    pub details: Option<String>,
}

impl From<ActivityRow> for ActivityLog {
    fn from(row: ActivityRow) -> Self {
        ActivityLog {
            id: row.id.to_string(),
            user_id: row.user_id.to_string(),
            user_name: row.user_name,
            action: row.action,
            document_id: row.document_id.map(|id| id.to_string()),
            document_name: row.document_name,
            timestamp: millis_to_datetime(row.timestamp),
            details: row.details,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewActivity<'a> {
    pub user_id: i64,
    pub user_name: &'a str,
    pub action: &'a str,
    pub document_id: Option<i64>,
    pub document_name: Option<&'a str>,
    pub details: Option<&'a str>,
}

pub async fn append<'e, E>(executor: E, entry: &NewActivity<'_>, now: i64) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO activity_log (id, user_id, user_name, action, document_id, document_name, timestamp, details) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(entry.user_id)
    .bind(entry.user_name)
    .bind(entry.action)
    .bind(entry.document_id)
    .bind(entry.document_name)
    .bind(now)
    .bind(entry.details)
    .execute(executor)
    .await?;
    Ok(id)
}

/// Most recent entries first
pub async fn recent<'e, E>(executor: E, limit: i64) -> Result<Vec<ActivityRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ActivityRow>(
        "SELECT id, user_id, user_name, action, document_id, document_name, timestamp, details \
         FROM activity_log ORDER BY timestamp DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Count entries with `action`, optionally only those at or after `since` (epoch millis)
pub async fn count_action<'e, E>(executor: E, action: &str, since: Option<i64>) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM activity_log WHERE action = ?1 AND (?2 IS NULL OR timestamp >= ?2)",
    )
    .bind(action)
    .bind(since)
    .fetch_one(executor)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    fn entry(action: &str) -> NewActivity<'_> {
        NewActivity {
            user_id: 1,
            user_name: "Jane",
            action,
            document_id: None,
            document_name: None,
            details: None,
        }
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_limited() {
        let db = test_db().await;
        for ts in [10, 30, 20] {
            append(&db.pool, &entry("upload"), ts).await.unwrap();
        }

        let rows = recent(&db.pool, 2).await.unwrap();
        let stamps: Vec<_> = rows.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, [30, 20]);
    }

    #[tokio::test]
    async fn count_action_respects_window() {
        let db = test_db().await;
        append(&db.pool, &entry("upload"), 100).await.unwrap();
        append(&db.pool, &entry("upload"), 200).await.unwrap();
        append(&db.pool, &entry("login"), 300).await.unwrap();

        assert_eq!(count_action(&db.pool, "upload", None).await.unwrap(), 2);
        assert_eq!(count_action(&db.pool, "upload", Some(150)).await.unwrap(), 1);
        assert_eq!(count_action(&db.pool, "upload", Some(201)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn optional_fields_round_trip() {
        let db = test_db().await;
        let e = NewActivity {
            document_id: Some(99),
            document_name: Some("a.pdf"),
            details: Some("batch of 1"),
            ..entry("upload")
        };
        append(&db.pool, &e, 5).await.unwrap();

        let log: ActivityLog = recent(&db.pool, 1).await.unwrap().remove(0).into();
        assert_eq!(log.document_id.as_deref(), Some("99"));
        assert_eq!(log.document_name.as_deref(), Some("a.pdf"));
        assert_eq!(log.details.as_deref(), Some("batch of 1"));
    }
}
