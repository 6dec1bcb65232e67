//! User account operations

use shared::models::{Role, UserInfo};
use sqlx::{Executor, Sqlite};

const COLUMNS: &str = "id, email, password_hash, name, role, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: i64,
}

impl UserRow {
    /// Stored role; anything unrecognised is treated as the unprivileged role
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::Employee)
    }

    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role(),
        }
    }
}

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: Role,
}

pub async fn insert<'e, E>(executor: E, user: &NewUser<'_>, now: i64) -> Result<UserRow, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO user (id, email, password_hash, name, role, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.name)
    .bind(user.role.as_str())
    .bind(now)
    .execute(executor)
    .await?;

    Ok(UserRow {
        id,
        email: user.email.to_string(),
        password_hash: user.password_hash.to_string(),
        name: user.name.to_string(),
        role: user.role.as_str().to_string(),
        created_at: now,
    })
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<UserRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM user WHERE email = ?"))
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<UserRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Overwrite the stored password hash; returns false when the user is gone
pub async fn update_password<'e, E>(executor: E, id: i64, password_hash: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE user SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM user WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    fn new_user<'a>(email: &'a str, hash: &'a str) -> NewUser<'a> {
        NewUser {
            email,
            password_hash: hash,
            name: "Jane",
            role: Role::Employee,
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let db = test_db().await;
        let created = insert(&db.pool, &new_user("jane@cafe.com", "h"), 1000)
            .await
            .unwrap();

        let by_email = find_by_email(&db.pool, "jane@cafe.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.role(), Role::Employee);

        let by_id = find_by_id(&db.pool, created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "jane@cafe.com");
        assert_eq!(by_id.to_info().id, created.id.to_string());
    }

    #[tokio::test]
    async fn duplicate_email_is_unique_violation() {
        let db = test_db().await;
        insert(&db.pool, &new_user("dup@cafe.com", "h"), 1).await.unwrap();
        let err = insert(&db.pool, &new_user("dup@cafe.com", "h"), 2)
            .await
            .unwrap_err();
        assert!(crate::error::is_unique_violation(&err));
    }

    #[tokio::test]
    async fn update_password_reports_missing_user() {
        let db = test_db().await;
        let user = insert(&db.pool, &new_user("p@cafe.com", "old"), 1)
            .await
            .unwrap();
        assert!(update_password(&db.pool, user.id, "new").await.unwrap());
        assert!(!update_password(&db.pool, 42, "new").await.unwrap());

        let reloaded = find_by_id(&db.pool, user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "new");
    }
}
