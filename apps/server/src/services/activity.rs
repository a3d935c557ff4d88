//! Activity recorder: a bounded, newest-first log of what each user changed.

use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Activity;

pub use crate::models::activity::{ACTIVITY_LOG_CAPACITY, ActivityEvent};

/// Append an event to a user's log on its own.
///
/// Mutations do not go through here: they append inside their own
/// transaction so the change and its entry commit together.
pub async fn record(pool: &DbPool, user_id: Uuid, event: ActivityEvent) -> AppResult<Activity> {
    let message = event.to_string();
    let entry = pool
        .append_activity(user_id, &message, ACTIVITY_LOG_CAPACITY)
        .await?;

    tracing::debug!(user_id = %user_id, message = %message, "Activity recorded");

    Ok(entry.into())
}

/// A user's log, newest first.
pub async fn list(pool: &DbPool, user_id: Uuid) -> AppResult<Vec<Activity>> {
    let entries = pool
        .list_activities(user_id, ACTIVITY_LOG_CAPACITY)
        .await?;
    Ok(entries.into_iter().map(Activity::from).collect())
}
