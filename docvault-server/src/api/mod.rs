//! HTTP routes
//!
//! - [`health`] - liveness and ping
//! - [`auth`] - login, logout, register, verify, password reset
//! - [`documents`] - upload, listing, search, view/download, delete
//! - [`employees`] - employee management
//! - [`logs`] - activity log and dashboard statistics

pub mod auth;
pub mod documents;
pub mod employees;
pub mod health;
pub mod logs;

mod extract;

pub use extract::AppJson;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use shared::error::ApiResponse;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::state::AppState;

/// Handler result: `{ success: true, ...T }` or an error envelope
pub type ApiResult<T> = Result<ApiResponse<T>, ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(documents::router())
        .merge(employees::router())
        .merge(logs::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
