//! Paired user + employee account creation

use shared::error::{AppError, ErrorCode};
use shared::models::Role;
use sqlx::SqlitePool;

use crate::db::employees::{self, EmployeeRow};
use crate::db::users::{self, NewUser, UserRow};
use crate::error::{ServiceResult, is_unique_violation};
use crate::util::{hash_password, normalize_email};

/// Credentials for a new employee-role account
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: &'a str,
    /// Message returned when the email is already taken
    pub duplicate_message: &'a str,
}

fn duplicate(message: &str) -> AppError {
    AppError::with_message(ErrorCode::EmailAlreadyExists, message)
}

/// Create a user and its employee record in one transaction.
///
/// The email is checked against both tables first; a UNIQUE violation from a
/// concurrent insert is reported the same way.
pub async fn create_account(
    pool: &SqlitePool,
    account: &NewAccount<'_>,
) -> ServiceResult<(UserRow, EmployeeRow)> {
    let email = normalize_email(account.email);

    if users::find_by_email(pool, &email).await?.is_some()
        || employees::find_by_email(pool, &email).await?.is_some()
    {
        return Err(duplicate(account.duplicate_message).into());
    }

    let password_hash =
        hash_password(account.password).map_err(|_| AppError::new(ErrorCode::InternalError))?;
    let now = shared::util::now_millis();

    let created = async {
        let mut tx = pool.begin().await?;
        let user = users::insert(
            &mut *tx,
            &NewUser {
                email: &email,
                password_hash: &password_hash,
                name: account.name,
                role: Role::Employee,
            },
            now,
        )
        .await?;
        let employee =
            employees::insert(&mut *tx, &email, account.name, user.id, Role::Employee, now).await?;
        tx.commit().await?;
        Ok::<_, sqlx::Error>((user, employee))
    }
    .await;

    match created {
        Ok(pair) => {
            tracing::info!(%email, user_id = pair.0.id, "Account created");
            Ok(pair)
        }
        Err(e) if is_unique_violation(&e) => Err(duplicate(account.duplicate_message).into()),
        Err(e) => Err(e.into()),
    }
}
