//! Authentication Routes

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build authentication router. Every route here is public.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/verify", get(handler::verify))
        .route("/api/auth/reset-password", post(handler::reset_password))
}
