//! Database queries for API tokens.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::api_token::{self, ActiveModel, Entity as ApiToken};
use crate::entity::user;
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Store a freshly issued token. Only its hash is persisted.
    pub async fn insert_api_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        token_prefix: &str,
    ) -> AppResult<api_token::Model> {
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            token_hash: Set(token_hash.to_string()),
            token_prefix: Set(token_prefix.to_string()),
            last_used_at: Set(None),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert API token: {}", e)))?;

        Ok(result)
    }

    /// Resolve the user owning a token hash and stamp the token as used.
    pub async fn find_user_by_token_hash(&self, token_hash: &str) -> AppResult<Option<user::Model>> {
        let found = ApiToken::find()
            .filter(api_token::Column::TokenHash.eq(token_hash))
            .find_also_related(user::Entity)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to look up API token: {}", e)))?;

        let Some((token, Some(owner))) = found else {
            return Ok(None);
        };

        let mut active: ActiveModel = token.into();
        active.last_used_at = Set(Some(Utc::now()));
        if let Err(e) = active.update(self.connection()).await {
            tracing::warn!("Failed to update token last_used_at: {}", e);
        }

        Ok(Some(owner))
    }
}
