//! Dashboard Statistics

use serde::{Deserialize, Serialize};

/// Aggregate upload statistics, recomputed on every request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_uploads: i64,
    pub today_uploads: i64,
    pub month_uploads: i64,
    /// Sum of all document sizes in bytes
    pub total_size: i64,
    pub active_employees: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    pub stats: DashboardStats,
}
