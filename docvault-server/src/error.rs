//! Unified service-layer error type for docvault-server
//!
//! `ServiceError` bridges the gap between DB-layer errors (`sqlx::Error`, `BoxError`)
//! and the API-layer error (`AppError`). It enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error, two variants only.
///
/// - `Db`: Database/infrastructure errors (auto-logged, mapped to InternalError)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error (sqlx, hashing, token signing, etc.)
    Db(BoxError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

/// True when `err` is a SQLite UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
