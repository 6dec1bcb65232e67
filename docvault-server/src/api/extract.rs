//! JSON body extractor with envelope-shaped rejections

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::MAX_FILE_SIZE;

/// Like [`Json`], but a bad body becomes a `{ success: false, ... }` envelope.
///
/// Bodies over the request limit map to `FileTooLarge` (413); anything else
/// that fails to parse is a validation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(map_rejection(rejection)),
        }
    }
}

fn map_rejection(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Request body exceeded the configured limit");
        return AppError::with_message(
            ErrorCode::FileTooLarge,
            "Request body too large. Maximum file size is 500 MB",
        )
        .with_detail("limit", MAX_FILE_SIZE);
    }
    AppError::validation(rejection.body_text())
}
