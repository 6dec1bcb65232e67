//! Activity Log and Dashboard Handlers

use axum::extract::{Query, State};
use shared::error::{ApiResponse, AppError};
use shared::models::{
    ActivityLogCreate, ActivityLogListResponse, ActivityLogQuery, DashboardStatsResponse, Empty,
};

use crate::api::{ApiResult, AppJson};
use crate::db::activity::{self, NewActivity};
use crate::services::stats;
use crate::state::AppState;
use crate::util::required;

fn parse_ref(field: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => shared::util::parse_id(raw)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Invalid {field}"))),
        None => Ok(None),
    }
}

/// POST /api/logs/activity
pub async fn log_activity(
    State(state): State<AppState>,
    AppJson(req): AppJson<ActivityLogCreate>,
) -> ApiResult<Empty> {
    let (Some(user_id), Some(user_name), Some(action)) = (
        required(&req.user_id),
        required(&req.user_name),
        required(&req.action),
    ) else {
        return Err(AppError::validation("Missing required fields").into());
    };

    let entry = NewActivity {
        user_id: parse_ref("userId", Some(user_id))?
            .ok_or_else(|| AppError::validation("Invalid userId"))?,
        user_name,
        action,
        document_id: parse_ref("documentId", req.document_id.as_deref())?,
        document_name: req.document_name.as_deref(),
        details: req.details.as_deref(),
    };
    activity::append(state.pool(), &entry, shared::util::now_millis()).await?;

    tracing::debug!(user_name, action, "Activity logged");
    Ok(ApiResponse::success(Empty {}))
}

/// GET /api/logs/activity?limit=N
pub async fn list_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityLogQuery>,
) -> ApiResult<ActivityLogListResponse> {
    let rows = activity::recent(state.pool(), query.effective_limit()).await?;
    Ok(ApiResponse::success(ActivityLogListResponse {
        logs: rows.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/dashboard/stats
pub async fn dashboard_stats(State(state): State<AppState>) -> ApiResult<DashboardStatsResponse> {
    let stats = stats::compute(state.pool()).await?;
    Ok(ApiResponse::success(DashboardStatsResponse { stats }))
}
