//! Database queries for the per-user activity log.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::activity_log::{self, Entity as ActivityLog};
use crate::error::{AppError, AppResult};
use crate::models::activity::{ACTIVITY_LOG_CAPACITY, ActivityEvent};

use super::DbPool;

/// Insert `message` on `conn` and evict everything beyond the newest `capacity` entries.
///
/// Callers run this inside a transaction so readers never see more than
/// `capacity` entries for a user.
async fn append_on<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    message: &str,
    capacity: u64,
) -> AppResult<activity_log::Model> {
    let inserted = activity_log::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user_id),
        message: Set(message.to_string()),
        timestamp: Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    let evicted: Vec<Uuid> = ActivityLog::find()
        .select_only()
        .column(activity_log::Column::Id)
        .filter(activity_log::Column::UserId.eq(user_id))
        .order_by_desc(activity_log::Column::Timestamp)
        .order_by_desc(activity_log::Column::Id)
        .into_tuple::<Uuid>()
        .all(conn)
        .await?
        .into_iter()
        .skip(capacity as usize)
        .collect();

    if !evicted.is_empty() {
        ActivityLog::delete_many()
            .filter(activity_log::Column::Id.is_in(evicted))
            .exec(conn)
            .await?;
    }

    Ok(inserted)
}

/// Log `event` for `user_id` as part of the mutation running on `conn`.
///
/// The entry commits or rolls back together with the change it describes.
pub(crate) async fn log_event<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    event: &ActivityEvent,
) -> AppResult<activity_log::Model> {
    let entry = append_on(conn, user_id, &event.to_string(), ACTIVITY_LOG_CAPACITY).await?;
    tracing::debug!(user_id = %user_id, message = %entry.message, "Activity recorded");
    Ok(entry)
}

impl DbPool {
    /// Append a message in its own transaction.
    pub async fn append_activity(
        &self,
        user_id: Uuid,
        message: &str,
        capacity: u64,
    ) -> AppResult<activity_log::Model> {
        let txn = self.connection().begin().await?;
        let inserted = append_on(&txn, user_id, message, capacity).await?;
        txn.commit().await?;
        Ok(inserted)
    }

    /// A user's most recent activity, newest first.
    pub async fn list_activities(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<activity_log::Model>> {
        let result = ActivityLog::find()
            .filter(activity_log::Column::UserId.eq(user_id))
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list activities: {}", e)))?;

        Ok(result)
    }
}
