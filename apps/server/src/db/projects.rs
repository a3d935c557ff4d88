//! Database queries for projects.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::project::{self, ActiveModel, Entity as Project};
use crate::entity::{test_case, test_case_version, test_run, test_run_entry};
use crate::error::{AppError, AppResult};
use crate::models::{ActivityEvent, ProjectRequest};

use super::DbPool;
use super::activities::log_event;

impl DbPool {
    /// Insert a new project owned by `user_id` and log `describe(&project)` for them.
    pub async fn insert_project(
        &self,
        user_id: Uuid,
        request: &ProjectRequest,
        describe: impl FnOnce(&project::Model) -> ActivityEvent,
    ) -> AppResult<project::Model> {
        let txn = self.connection().begin().await?;

        let now = Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(request.name.trim().to_string()),
            description: Set(request.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert project: {}", e)))?;
        log_event(&txn, user_id, &describe(&result)).await?;

        txn.commit().await?;
        Ok(result)
    }

    /// Get a project by ID, visible only to its owner.
    pub async fn get_project(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<project::Model>> {
        let result = Project::find_by_id(id)
            .filter(project::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get project: {}", e)))?;

        Ok(result)
    }

    /// Whether a project exists under any owner.
    pub async fn project_exists(&self, id: Uuid) -> AppResult<bool> {
        let count = Project::find_by_id(id)
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to check project: {}", e)))?;

        Ok(count > 0)
    }

    /// List a user's projects, newest first.
    pub async fn list_projects(&self, user_id: Uuid) -> AppResult<Vec<project::Model>> {
        let result = Project::find()
            .filter(project::Column::UserId.eq(user_id))
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list projects: {}", e)))?;

        Ok(result)
    }

    /// IDs of every project owned by a user.
    pub async fn list_project_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let result = Project::find()
            .select_only()
            .column(project::Column::Id)
            .filter(project::Column::UserId.eq(user_id))
            .into_tuple::<Uuid>()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list project ids: {}", e)))?;

        Ok(result)
    }

    /// Rename or re-describe a project, logging `describe(&updated)`.
    pub async fn update_project(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: &ProjectRequest,
        describe: impl FnOnce(&project::Model) -> ActivityEvent,
    ) -> AppResult<project::Model> {
        let txn = self.connection().begin().await?;

        let existing = Project::find_by_id(id)
            .filter(project::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", id)))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(request.name.trim().to_string());
        active.description = Set(request.description.clone());
        active.updated_at = Set(Utc::now());

        let result = active
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to update project: {}", e)))?;
        log_event(&txn, user_id, &describe(&result)).await?;

        txn.commit().await?;
        Ok(result)
    }

    /// Delete a project and everything scoped to it in one transaction.
    ///
    /// Children are removed explicitly, deepest first, so no version or run
    /// entry outlives its parent even on backends without FK cascades.
    /// `describe(&deleted)` is logged in the same transaction. Returns the
    /// deleted project, or `None` if it did not exist.
    pub async fn delete_project(
        &self,
        user_id: Uuid,
        id: Uuid,
        describe: impl FnOnce(&project::Model) -> ActivityEvent,
    ) -> AppResult<Option<project::Model>> {
        let txn = self.connection().begin().await?;

        let Some(existing) = Project::find_by_id(id)
            .filter(project::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let case_ids: Vec<Uuid> = test_case::Entity::find()
            .select_only()
            .column(test_case::Column::Id)
            .filter(test_case::Column::ProjectId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let run_ids: Vec<Uuid> = test_run::Entity::find()
            .select_only()
            .column(test_run::Column::Id)
            .filter(test_run::Column::ProjectId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !run_ids.is_empty() {
            test_run_entry::Entity::delete_many()
                .filter(test_run_entry::Column::TestRunId.is_in(run_ids.clone()))
                .exec(&txn)
                .await?;
        }

        if !case_ids.is_empty() {
            test_run_entry::Entity::delete_many()
                .filter(test_run_entry::Column::TestCaseId.is_in(case_ids.clone()))
                .exec(&txn)
                .await?;
            test_case_version::Entity::delete_many()
                .filter(test_case_version::Column::TestCaseId.is_in(case_ids))
                .exec(&txn)
                .await?;
        }

        test_run::Entity::delete_many()
            .filter(test_run::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        test_case::Entity::delete_many()
            .filter(test_case::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        Project::delete_by_id(id).exec(&txn).await?;
        log_event(&txn, user_id, &describe(&existing)).await?;

        txn.commit().await?;

        Ok(Some(existing))
    }
}
