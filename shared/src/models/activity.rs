//! Activity Log Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action name counted by the dashboard statistics
pub const ACTION_UPLOAD: &str = "upload";

/// Default number of entries returned by the activity listing
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 50;

/// Hard upper bound on the activity listing
pub const MAX_ACTIVITY_LIMIT: i64 = 500;

/// Append-only activity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Append payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogCreate {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub action: Option<String>,
    pub document_id: Option<String>,
    pub document_name: Option<String>,
    pub details: Option<String>,
}

/// `?limit=` query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLogQuery {
    pub limit: Option<String>,
}

impl ActivityLogQuery {
    /// Effective limit: default when absent or unparsable, clamped to `1..=500`
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogListResponse {
    pub logs: Vec<ActivityLog>,
}
