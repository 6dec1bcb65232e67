//! Document API Module

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Document router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api/documents", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/upload", post(handler::upload))
        .route("/batch-upload", post(handler::batch_upload))
        .route("/search/query", get(handler::search))
        .route("/view/{id}", get(handler::view))
        .route("/download/{id}", get(handler::download))
        // Delete is gated on the caller's role inside the handler
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
}
