//! Authentication Handlers
//!
//! Login and register issue a signed token, returned both in the body and
//! as the `authToken` cookie.

use axum::extract::State;
use axum::response::IntoResponse;
use http::HeaderMap;
use http::header::SET_COOKIE;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    AuthResponse, Empty, LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest,
    UserInfo, UserResponse,
};

use crate::api::{ApiResult, AppJson};
use crate::auth::token::{self, clear_cookie, session_cookie};
use crate::db::{employees, users};
use crate::error::{ServiceError, ServiceResult};
use crate::services::accounts::{self, NewAccount};
use crate::state::AppState;
use crate::util::{hash_password, normalize_email, required, verify_password};

/// The response owns everything it needs; `use<>` keeps it from borrowing `state`.
fn issue_token(
    state: &AppState,
    user: UserInfo,
    user_id: i64,
) -> ServiceResult<impl IntoResponse + use<>> {
    let token = token::create_token(user_id, &user.email, user.role, state.jwt_secret())
        .map_err(|e| ServiceError::Db(e.into()))?;
    let cookie = session_cookie(&token);
    Ok((
        [(SET_COOKIE, cookie)],
        ApiResponse::success(AuthResponse { token, user }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let (Some(email), Some(password)) = (required(&req.email), req.password.as_deref()) else {
        return Err(AppError::invalid_credentials().into());
    };
    let email = normalize_email(email);

    let Some(user) = users::find_by_email(state.pool(), &email).await? else {
        tracing::warn!(%email, "Login failed - user not found");
        return Err(AppError::invalid_credentials().into());
    };
    if !verify_password(password, &user.password_hash) {
        tracing::warn!(%email, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials().into());
    }

    let blocked = employees::find_by_user_id(state.pool(), user.id)
        .await?
        .is_some_and(|e| !e.is_active);
    if blocked {
        tracing::warn!(%email, "Login rejected - account blocked");
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    tracing::info!(%email, role = %user.role(), "User logged in");
    issue_token(&state, user.to_info(), user.id)
}

/// POST /api/auth/logout
pub async fn logout() -> impl IntoResponse {
    ([(SET_COOKIE, clear_cookie())], ApiResponse::success(Empty {}))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let (Some(email), Some(password), Some(name)) = (
        required(&req.email),
        req.password.as_deref().filter(|p| !p.is_empty()),
        required(&req.name),
    ) else {
        return Err(AppError::validation("Missing required fields: email, password, name").into());
    };

    let (user, _) = accounts::create_account(
        state.pool(),
        &NewAccount {
            email,
            name,
            password,
            duplicate_message: "User already exists",
        },
    )
    .await?;

    issue_token(&state, user.to_info(), user.id)
}

/// GET /api/auth/verify
pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<UserResponse> {
    let token = token::token_from_headers(&headers).ok_or_else(AppError::not_authenticated)?;
    let claims = token::verify_token(&token, state.jwt_secret())?;

    let user = match claims.user_id() {
        Some(id) => users::find_by_id(state.pool(), id).await?,
        None => None,
    }
    .ok_or_else(|| AppError::with_message(ErrorCode::TokenInvalid, "User not found"))?;

    Ok(ApiResponse::success(UserResponse {
        user: user.to_info(),
    }))
}

/// POST /api/auth/reset-password
///
/// No length check here; the client enforces the minimum before calling.
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> ApiResult<MessageResponse> {
    let (Some(email), Some(current), Some(new)) = (
        required(&req.email),
        req.current_password.as_deref(),
        req.new_password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation(
            "Missing required fields: email, currentPassword, newPassword",
        )
        .into());
    };
    let email = normalize_email(email);

    let user = users::find_by_email(state.pool(), &email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    if !verify_password(current, &user.password_hash) {
        return Err(AppError::new(ErrorCode::IncorrectPassword).into());
    }

    let hash = hash_password(new).map_err(|_| AppError::new(ErrorCode::InternalError))?;
    users::update_password(state.pool(), user.id, &hash).await?;
    tracing::info!(%email, "Password reset");

    Ok(ApiResponse::success(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
