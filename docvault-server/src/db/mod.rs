//! Database Module
//!
//! Handles the SQLite connection pool, migrations and the bootstrap admin seed.
//! Repository functions take a `&SqlitePool` (or a transaction) and return
//! `sqlx::Error`; handlers bridge them through `ServiceError`.

pub mod activity;
pub mod blobs;
pub mod documents;
pub mod employees;
pub mod users;

use shared::models::Role;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

use crate::error::BoxError;

/// Database service, owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open the database, apply migrations.
    ///
    /// In-memory URLs get a single pinned connection so every query sees the same database.
    pub async fn new(database_url: &str) -> Result<Self, BoxError> {
        let in_memory = database_url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| format!("Invalid database url: {e}"))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to open database: {e}"))?;
        tracing::info!(in_memory, "Database connection established");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to apply migrations: {e}"))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Create the bootstrap admin in both the user and employee tables if absent.
    ///
    /// Idempotent: existing rows are left untouched, a missing half is filled in.
    pub async fn seed_admin(&self, email: &str, password: &str, name: &str) -> Result<(), BoxError> {
        let email = crate::util::normalize_email(email);
        let now = shared::util::now_millis();

        let user = match users::find_by_email(&self.pool, &email).await? {
            Some(user) => {
                tracing::info!(%email, "Admin user already exists");
                user
            }
            None => {
                let hash = crate::util::hash_password(password)
                    .map_err(|e| format!("Failed to hash admin password: {e}"))?;
                let user = users::insert(
                    &self.pool,
                    &users::NewUser {
                        email: &email,
                        password_hash: &hash,
                        name,
                        role: Role::Admin,
                    },
                    now,
                )
                .await?;
                tracing::info!(%email, "Default admin user created");
                user
            }
        };

        if employees::find_by_email(&self.pool, &email).await?.is_none() {
            employees::insert(&self.pool, &email, name, user.id, Role::Admin, now).await?;
            tracing::info!(%email, "Admin added to employee table");
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::DbService;

    /// Fresh in-memory database with the schema applied
    pub async fn test_db() -> DbService {
        DbService::new("sqlite::memory:").await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::test_db;
    use super::*;

    #[tokio::test]
    async fn seed_admin_is_idempotent() {
        let db = test_db().await;
        db.seed_admin("admin@cafe.com", "admin123", "Admin User")
            .await
            .unwrap();
        db.seed_admin("admin@cafe.com", "other", "Someone Else")
            .await
            .unwrap();

        let user = users::find_by_email(&db.pool, "admin@cafe.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, "admin");
        assert!(crate::util::verify_password("admin123", &user.password_hash));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn seed_admin_repairs_missing_employee_row() {
        let db = test_db().await;
        db.seed_admin("admin@cafe.com", "admin123", "Admin User")
            .await
            .unwrap();
        sqlx::query("DELETE FROM employee")
            .execute(&db.pool)
            .await
            .unwrap();

        db.seed_admin("admin@cafe.com", "admin123", "Admin User")
            .await
            .unwrap();
        let emp = employees::find_by_email(&db.pool, "admin@cafe.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(emp.role, "admin");
        assert!(emp.is_active);
    }
}
