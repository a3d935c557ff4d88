//! Aggregate counts for the dashboard. Nothing here is stored.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::{test_case, test_run};
use crate::error::{AppError, AppResult};
use crate::models::{TestCaseStatus, TestRunStatus};

use super::DbPool;

/// Raw counts over a set of projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectCounts {
    pub test_cases: u64,
    pub completed_test_cases: u64,
    pub active_test_runs: u64,
}

impl DbPool {
    /// Count test cases and active runs across the given projects.
    pub async fn count_for_projects(&self, project_ids: &[Uuid]) -> AppResult<ProjectCounts> {
        if project_ids.is_empty() {
            return Ok(ProjectCounts::default());
        }

        let ids = project_ids.to_vec();

        let test_cases = test_case::Entity::find()
            .filter(test_case::Column::ProjectId.is_in(ids.clone()))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count test cases: {}", e)))?;

        let completed_test_cases = test_case::Entity::find()
            .filter(test_case::Column::ProjectId.is_in(ids.clone()))
            .filter(test_case::Column::Status.eq(TestCaseStatus::Completed))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count test cases: {}", e)))?;

        let active_test_runs = test_run::Entity::find()
            .filter(test_run::Column::ProjectId.is_in(ids))
            .filter(test_run::Column::Status.eq(TestRunStatus::InProgress))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count test runs: {}", e)))?;

        Ok(ProjectCounts {
            test_cases,
            completed_test_cases,
            active_test_runs,
        })
    }
}
