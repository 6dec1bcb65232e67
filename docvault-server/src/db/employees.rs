//! Employee operations
//!
//! `documents_count` is never stored: every read computes it from the
//! document table by `uploaded_by = user_id`.

use shared::models::{Employee, Role};
use shared::util::millis_to_datetime;
use sqlx::{Executor, Sqlite};

const SELECT_WITH_COUNT: &str = "SELECT e.id, e.email, e.name, e.user_id, e.role, e.is_active, e.created_at, \
     (SELECT COUNT(*) FROM document d WHERE d.uploaded_by = e.user_id) AS documents_count \
     FROM employee e";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub user_id: i64,
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
    pub documents_count: i64,
}

impl EmployeeRow {
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Employee)
    }
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id.to_string(),
            role: row.role(),
            email: row.email,
            name: row.name,
            user_id: row.user_id.to_string(),
            is_active: row.is_active,
            created_at: millis_to_datetime(row.created_at),
            documents_count: row.documents_count,
        }
    }
}

pub async fn insert<'e, E>(
    executor: E,
    email: &str,
    name: &str,
    user_id: i64,
    role: Role,
    now: i64,
) -> Result<EmployeeRow, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO employee (id, email, name, user_id, role, is_active, created_at) VALUES (?, ?, ?, ?, ?, 1, ?)",
    )
    .bind(id)
    .bind(email)
    .bind(name)
    .bind(user_id)
    .bind(role.as_str())
    .bind(now)
    .execute(executor)
    .await?;

    Ok(EmployeeRow {
        id,
        email: email.to_string(),
        name: name.to_string(),
        user_id,
        role: role.as_str().to_string(),
        is_active: true,
        created_at: now,
        documents_count: 0,
    })
}

/// All employees, newest first
pub async fn list<'e, E>(executor: E) -> Result<Vec<EmployeeRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, EmployeeRow>(&format!(
        "{SELECT_WITH_COUNT} ORDER BY e.created_at DESC, e.id DESC"
    ))
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<EmployeeRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_WITH_COUNT} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<EmployeeRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_WITH_COUNT} WHERE e.email = ?"))
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_user_id<'e, E>(executor: E, user_id: i64) -> Result<Option<EmployeeRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_WITH_COUNT} WHERE e.user_id = ?"))
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

/// Partial update; `None` fields are left as they are. Returns false when no row matched.
pub async fn update<'e, E>(
    executor: E,
    id: i64,
    name: Option<&str>,
    is_active: Option<bool>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "UPDATE employee SET name = COALESCE(?, name), is_active = COALESCE(?, is_active) WHERE id = ?",
    )
    .bind(name)
    .bind(is_active)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_active<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE is_active = 1")
        .fetch_one(executor)
        .await
}
