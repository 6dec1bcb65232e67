//! Activity Log and Dashboard API Module

mod handler;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Activity log and dashboard statistics router
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/logs/activity",
            get(handler::list_activity).post(handler::log_activity),
        )
        .route("/api/dashboard/stats", get(handler::dashboard_stats))
}
