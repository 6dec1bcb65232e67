//! Employee API Module

mod handler;

use axum::Router;
use axum::routing::{delete, get, patch};

use crate::state::AppState;

/// Employee router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .put(handler::update),
        )
        .route("/{id}", delete(handler::delete))
        .route("/{id}/block", patch(handler::block))
        .route("/{id}/unblock", patch(handler::unblock))
}
