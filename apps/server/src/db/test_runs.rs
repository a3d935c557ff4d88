//! Database queries for test runs and their entries.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::test_case;
use crate::entity::test_run::{self, Entity as TestRun};
use crate::entity::test_run_entry::{self, Entity as TestRunEntry};
use crate::error::{AppError, AppResult};
use crate::models::{ActivityEvent, ExecutionStatus, RunProgress, TestRunStatus};

use super::DbPool;
use super::activities::log_event;

impl DbPool {
    /// Create a run with one `not_run` entry per test case, atomically.
    ///
    /// `test_case_ids` must already be deduplicated; entries keep its order.
    /// Every id must name a test case of `project_id`. `describe(&run)` is
    /// logged for `actor` in the same transaction.
    pub async fn insert_test_run(
        &self,
        project_id: Uuid,
        name: &str,
        tester: &str,
        test_case_ids: &[Uuid],
        actor: Uuid,
        describe: impl FnOnce(&test_run::Model) -> ActivityEvent,
    ) -> AppResult<(test_run::Model, Vec<test_run_entry::Model>)> {
        let txn = self.connection().begin().await?;

        let known: HashSet<Uuid> = test_case::Entity::find()
            .select_only()
            .column(test_case::Column::Id)
            .filter(test_case::Column::ProjectId.eq(project_id))
            .filter(test_case::Column::Id.is_in(test_case_ids.to_vec()))
            .into_tuple::<Uuid>()
            .all(&txn)
            .await?
            .into_iter()
            .collect();

        if let Some(missing) = test_case_ids.iter().find(|id| !known.contains(id)) {
            return Err(AppError::InvalidInput(format!(
                "Test case {} does not belong to project {}",
                missing, project_id
            )));
        }

        let now = Utc::now();
        let run = test_run::ActiveModel {
            id: Set(Uuid::now_v7()),
            project_id: Set(project_id),
            name: Set(name.trim().to_string()),
            tester: Set(tester.trim().to_string()),
            status: Set(TestRunStatus::InProgress),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut entries = Vec::with_capacity(test_case_ids.len());
        for (position, test_case_id) in test_case_ids.iter().enumerate() {
            let entry = test_run_entry::ActiveModel {
                id: Set(Uuid::now_v7()),
                test_run_id: Set(run.id),
                test_case_id: Set(*test_case_id),
                position: Set(position as i32),
                status: Set(ExecutionStatus::NotRun),
                comments: Set(String::new()),
                executed_at: Set(None),
            }
            .insert(&txn)
            .await?;
            entries.push(entry);
        }
        log_event(&txn, actor, &describe(&run)).await?;

        txn.commit().await?;
        Ok((run, entries))
    }

    /// Get a test run by ID.
    pub async fn get_test_run(&self, id: Uuid) -> AppResult<Option<test_run::Model>> {
        let result = TestRun::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test run: {}", e)))?;

        Ok(result)
    }

    /// List a project's runs, newest first.
    pub async fn list_test_runs(&self, project_id: Uuid) -> AppResult<Vec<test_run::Model>> {
        let result = TestRun::find()
            .filter(test_run::Column::ProjectId.eq(project_id))
            .order_by_desc(test_run::Column::CreatedAt)
            .order_by_desc(test_run::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test runs: {}", e)))?;

        Ok(result)
    }

    /// Set a run's status by hand.
    pub async fn update_test_run_status(
        &self,
        id: Uuid,
        status: TestRunStatus,
    ) -> AppResult<test_run::Model> {
        let existing = self
            .get_test_run(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test run {}", id)))?;

        let mut active: test_run::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update test run: {}", e)))?;

        Ok(result)
    }

    /// Entries of a run in selection order.
    pub async fn list_test_run_entries(
        &self,
        test_run_id: Uuid,
    ) -> AppResult<Vec<test_run_entry::Model>> {
        let result = TestRunEntry::find()
            .filter(test_run_entry::Column::TestRunId.eq(test_run_id))
            .order_by_asc(test_run_entry::Column::Position)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list run entries: {}", e)))?;

        Ok(result)
    }

    /// Get a run entry by ID.
    pub async fn get_test_run_entry(&self, id: Uuid) -> AppResult<Option<test_run_entry::Model>> {
        let result = TestRunEntry::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get run entry: {}", e)))?;

        Ok(result)
    }

    /// Record an execution outcome. Stamps `executed_at` with the current time.
    ///
    /// Touches only the entry row; the referenced test case is left alone.
    pub async fn record_execution(
        &self,
        id: Uuid,
        status: ExecutionStatus,
        comments: &str,
    ) -> AppResult<test_run_entry::Model> {
        let existing = self
            .get_test_run_entry(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test run entry {}", id)))?;

        let mut active: test_run_entry::ActiveModel = existing.into();
        active.status = Set(status);
        active.comments = Set(comments.to_string());
        active.executed_at = Set(Some(Utc::now()));

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to record execution: {}", e)))?;

        Ok(result)
    }

    /// Outcome counts for each of the given runs.
    pub async fn get_run_progress(
        &self,
        run_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, RunProgress>> {
        let mut progress: HashMap<Uuid, RunProgress> = run_ids
            .iter()
            .map(|id| (*id, RunProgress::default()))
            .collect();

        if run_ids.is_empty() {
            return Ok(progress);
        }

        let rows: Vec<(Uuid, ExecutionStatus)> = TestRunEntry::find()
            .select_only()
            .column(test_run_entry::Column::TestRunId)
            .column(test_run_entry::Column::Status)
            .filter(test_run_entry::Column::TestRunId.is_in(run_ids.to_vec()))
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load run progress: {}", e)))?;

        for (run_id, status) in rows {
            progress.entry(run_id).or_default().add(status);
        }

        Ok(progress)
    }
}
