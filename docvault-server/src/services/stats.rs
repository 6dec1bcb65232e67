//! Dashboard statistics, recomputed on every request

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use shared::models::{ACTION_UPLOAD, DashboardStats};
use sqlx::SqlitePool;

use crate::db::{activity, documents, employees};

/// Lower bounds (epoch millis) of the "today" and "this month" counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    pub today_start: i64,
    pub month_start: i64,
}

/// Local midnight of `now`'s day and of the first day of its month.
///
/// A midnight that does not exist in the zone (DST gap) falls back to `now`.
pub fn stats_window<Tz: TimeZone>(now: &DateTime<Tz>) -> StatsWindow {
    let tz = now.timezone();
    let start_of = |day: NaiveDate| {
        day.and_hms_opt(0, 0, 0)
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
            .map_or(now.timestamp_millis(), |dt| dt.timestamp_millis())
    };

    let today = now.date_naive();
    let first_of_month = today.with_day(1).unwrap_or(today);
    StatsWindow {
        today_start: start_of(today),
        month_start: start_of(first_of_month),
    }
}

/// Compute the dashboard counters against the server's local time
pub async fn compute(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    compute_at(pool, &chrono::Local::now()).await
}

pub async fn compute_at<Tz: TimeZone>(
    pool: &SqlitePool,
    now: &DateTime<Tz>,
) -> Result<DashboardStats, sqlx::Error> {
    let window = stats_window(now);

    let total_uploads = activity::count_action(pool, ACTION_UPLOAD, None).await?;
    let today_uploads = activity::count_action(pool, ACTION_UPLOAD, Some(window.today_start)).await?;
    let month_uploads = activity::count_action(pool, ACTION_UPLOAD, Some(window.month_start)).await?;
    let total_size = documents::total_size(pool).await?;
    let active_employees = employees::count_active(pool).await?;

    Ok(DashboardStats {
        total_uploads,
        today_uploads,
        month_uploads,
        total_size,
        active_employees,
    })
}
