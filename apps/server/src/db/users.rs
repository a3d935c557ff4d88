//! Database queries for users.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Entity as User};
use crate::error::{AppError, AppResult};

use super::DbPool;

/// Normalized lookup key for a username. Usernames are unique ignoring case.
pub fn username_key(username: &str) -> String {
    username.trim().to_lowercase()
}

impl DbPool {
    /// Insert a new user. Fails with `Conflict` when the username is taken.
    pub async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<user::Model> {
        let key = username_key(username);
        if self.find_user_by_username(&key).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                username.trim()
            )));
        }

        let now = Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(username.trim().to_string()),
            username_key: Set(key),
            email: Set(email.trim().to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert user: {}", e)))?;

        Ok(result)
    }

    /// Find a user by username, ignoring case.
    pub async fn find_user_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        let result = User::find()
            .filter(user::Column::UsernameKey.eq(username_key(username)))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find user: {}", e)))?;

        Ok(result)
    }

    /// Get a user by ID.
    pub async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<user::Model>> {
        let result = User::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?;

        Ok(result)
    }

    /// Change a user's username and email.
    pub async fn update_user_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
    ) -> AppResult<user::Model> {
        let existing = self
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", id)))?;

        let key = username_key(username);
        if key != existing.username_key {
            if let Some(other) = self.find_user_by_username(&key).await? {
                if other.id != id {
                    return Err(AppError::Conflict(format!(
                        "Username '{}' is already taken",
                        username.trim()
                    )));
                }
            }
        }

        let mut active: ActiveModel = existing.into();
        active.username = Set(username.trim().to_string());
        active.username_key = Set(key);
        active.email = Set(email.trim().to_string());
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update user: {}", e)))?;

        Ok(result)
    }
}
