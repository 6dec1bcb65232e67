//! Health check and ping endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::models::MessageResponse;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ping", get(ping))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "docvault-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `{ "message": PING_MESSAGE }`
pub async fn ping(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: state.config.ping_message.clone(),
    })
}
