//! Employee Model

use super::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employee as returned by the API (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub email: String,
    pub name: String,
    pub user_id: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Number of documents uploaded by `user_id`, computed per read
    pub documents_count: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Update employee payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub employee: Employee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
}
