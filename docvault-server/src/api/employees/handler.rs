//! Employee API Handlers

use axum::extract::{Path, State};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    Empty, EmployeeCreate, EmployeeListResponse, EmployeeResponse, EmployeeUpdate,
};

use crate::api::{ApiResult, AppJson};
use crate::db::employees::{self, EmployeeRow};
use crate::db::users;
use crate::error::ServiceResult;
use crate::services::accounts::{self, NewAccount};
use crate::state::AppState;
use crate::util::{MIN_PASSWORD_LEN, required};

fn employee_not_found() -> AppError {
    AppError::new(ErrorCode::EmployeeNotFound)
}

async fn find_employee(state: &AppState, raw_id: &str) -> ServiceResult<EmployeeRow> {
    let id = shared::util::parse_id(raw_id).ok_or_else(employee_not_found)?;
    let row = employees::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(employee_not_found)?;
    Ok(row)
}

/// Apply a partial update and return the fresh row
async fn apply_update(
    state: &AppState,
    current: &EmployeeRow,
    name: Option<&str>,
    is_active: Option<bool>,
) -> ApiResult<EmployeeResponse> {
    if is_active == Some(false) && current.role().is_admin() {
        return Err(AppError::new(ErrorCode::CannotModifyAdmin).into());
    }

    if !employees::update(state.pool(), current.id, name, is_active).await? {
        return Err(employee_not_found().into());
    }
    let row = employees::find_by_id(state.pool(), current.id)
        .await?
        .ok_or_else(employee_not_found)?;

    Ok(ApiResponse::success(EmployeeResponse {
        employee: row.into(),
    }))
}

/// GET /api/employees
pub async fn list(State(state): State<AppState>) -> ApiResult<EmployeeListResponse> {
    let rows = employees::list(state.pool()).await?;
    Ok(ApiResponse::success(EmployeeListResponse {
        employees: rows.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/employees
pub async fn create(
    State(state): State<AppState>,
    AppJson(req): AppJson<EmployeeCreate>,
) -> ApiResult<EmployeeResponse> {
    let password = req
        .password
        .as_deref()
        .filter(|p| p.chars().count() >= MIN_PASSWORD_LEN)
        .ok_or_else(|| AppError::new(ErrorCode::WeakPassword))?;
    let (Some(email), Some(name)) = (required(&req.email), required(&req.name)) else {
        return Err(AppError::validation("Missing required fields: email, name").into());
    };

    let (_, employee) = accounts::create_account(
        state.pool(),
        &NewAccount {
            email,
            name,
            password,
            duplicate_message: "Employee already exists",
        },
    )
    .await?;

    tracing::info!(employee_id = employee.id, email = %employee.email, "Employee added");
    Ok(ApiResponse::success(EmployeeResponse {
        employee: employee.into(),
    }))
}

/// PUT /api/employees
pub async fn update(
    State(state): State<AppState>,
    AppJson(req): AppJson<EmployeeUpdate>,
) -> ApiResult<EmployeeResponse> {
    let id = req.id.as_deref().ok_or_else(employee_not_found)?;
    let current = find_employee(&state, id).await?;
    apply_update(&state, &current, required(&req.name), req.is_active).await
}

/// DELETE /api/employees/{id}
///
/// Removes the employee together with its user account.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Empty> {
    let employee = find_employee(&state, &id).await?;
    if employee.role().is_admin() {
        return Err(AppError::new(ErrorCode::CannotDeleteAdmin).into());
    }

    let mut tx = state.pool().begin().await?;
    if !employees::delete(&mut *tx, employee.id).await? {
        return Err(employee_not_found().into());
    }
    users::delete(&mut *tx, employee.user_id).await?;
    tx.commit().await?;

    tracing::info!(employee_id = employee.id, email = %employee.email, "Employee deleted");
    Ok(ApiResponse::success(Empty {}))
}

/// PATCH /api/employees/{id}/block
pub async fn block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EmployeeResponse> {
    let current = find_employee(&state, &id).await?;
    let response = apply_update(&state, &current, None, Some(false)).await?;
    tracing::info!(employee_id = current.id, "Employee blocked");
    Ok(response)
}

/// PATCH /api/employees/{id}/unblock
pub async fn unblock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EmployeeResponse> {
    let current = find_employee(&state, &id).await?;
    let response = apply_update(&state, &current, None, Some(true)).await?;
    tracing::info!(employee_id = current.id, "Employee unblocked");
    Ok(response)
}
