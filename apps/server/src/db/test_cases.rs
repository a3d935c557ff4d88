//! Database queries for test cases and their version history.
//!
//! Edits and rollbacks go through [`supersede`]: the live row is updated with
//! an optimistic check on its version counter, then the outgoing state is
//! stored as an immutable snapshot, all inside the caller's transaction.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::test_case::{self, ActiveModel, Entity as TestCase};
use crate::entity::test_case_version::{self, Entity as TestCaseVersion};
use crate::entity::test_run_entry;
use crate::error::{AppError, AppResult};
use crate::models::{ActivityEvent, ListTestCasesQuery, TestCaseData, TestCaseSort};

use super::DbPool;
use super::activities::log_event;

fn new_test_case(project_id: Uuid, data: &TestCaseData) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        id: Set(Uuid::now_v7()),
        project_id: Set(project_id),
        title: Set(data.title.trim().to_string()),
        description: Set(data.description.clone()),
        priority: Set(data.priority),
        status: Set(data.status),
        version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Replace the live content of `current` with `data` as version `current.version + 1`.
///
/// Fails with `Conflict` if another writer bumped the version since `current`
/// was read. The snapshot records the outgoing version and its `updated_at`.
pub(crate) async fn supersede(
    txn: &DatabaseTransaction,
    current: &test_case::Model,
    data: &TestCaseData,
) -> AppResult<test_case::Model> {
    let now = Utc::now();

    let result = TestCase::update_many()
        .col_expr(test_case::Column::Title, Expr::value(data.title.trim()))
        .col_expr(
            test_case::Column::Description,
            Expr::value(data.description.clone()),
        )
        .col_expr(test_case::Column::Priority, Expr::value(data.priority))
        .col_expr(test_case::Column::Status, Expr::value(data.status))
        .col_expr(test_case::Column::Version, Expr::value(current.version + 1))
        .col_expr(test_case::Column::UpdatedAt, Expr::value(now))
        .filter(test_case::Column::Id.eq(current.id))
        .filter(test_case::Column::Version.eq(current.version))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Conflict(format!(
            "Test case {} was modified concurrently",
            current.id
        )));
    }

    let snapshot = test_case_version::ActiveModel {
        id: Set(Uuid::now_v7()),
        test_case_id: Set(current.id),
        version: Set(current.version),
        title: Set(current.title.clone()),
        description: Set(current.description.clone()),
        priority: Set(current.priority),
        status: Set(current.status),
        changed_at: Set(current.updated_at),
    };
    snapshot.insert(txn).await?;

    let updated = TestCase::find_by_id(current.id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test case {}", current.id)))?;

    Ok(updated)
}

impl DbPool {
    /// Insert a new test case at version 1. No snapshot is stored.
    ///
    /// `describe(&created)` is logged for `actor` in the same transaction.
    pub async fn insert_test_case(
        &self,
        project_id: Uuid,
        data: &TestCaseData,
        actor: Uuid,
        describe: impl FnOnce(&test_case::Model) -> ActivityEvent,
    ) -> AppResult<test_case::Model> {
        let txn = self.connection().begin().await?;

        let result = new_test_case(project_id, data)
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert test case: {}", e)))?;
        log_event(&txn, actor, &describe(&result)).await?;

        txn.commit().await?;
        Ok(result)
    }

    /// Insert several test cases atomically, in the given order.
    pub async fn insert_test_cases(
        &self,
        project_id: Uuid,
        items: &[TestCaseData],
        actor: Uuid,
        describe: impl FnOnce(&[test_case::Model]) -> ActivityEvent,
    ) -> AppResult<Vec<test_case::Model>> {
        let txn = self.connection().begin().await?;

        let mut inserted = Vec::with_capacity(items.len());
        for data in items {
            inserted.push(new_test_case(project_id, data).insert(&txn).await?);
        }
        log_event(&txn, actor, &describe(&inserted)).await?;

        txn.commit().await?;
        Ok(inserted)
    }

    /// Get a test case by ID.
    pub async fn get_test_case(&self, id: Uuid) -> AppResult<Option<test_case::Model>> {
        let result = TestCase::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test case: {}", e)))?;

        Ok(result)
    }

    /// List a project's test cases with status and priority filters applied.
    ///
    /// Rows come back in creation order: ascending for `created_at_asc`,
    /// descending otherwise. Text search and priority ordering are applied by
    /// the caller.
    pub async fn list_test_cases(
        &self,
        project_id: Uuid,
        query: &ListTestCasesQuery,
    ) -> AppResult<Vec<test_case::Model>> {
        let mut select = TestCase::find().filter(test_case::Column::ProjectId.eq(project_id));

        if let Some(status) = query.status {
            select = select.filter(test_case::Column::Status.eq(status));
        }
        if let Some(priority) = query.priority {
            select = select.filter(test_case::Column::Priority.eq(priority));
        }

        select = match query.sort() {
            TestCaseSort::CreatedAtAsc => select
                .order_by_asc(test_case::Column::CreatedAt)
                .order_by_asc(test_case::Column::Id),
            _ => select
                .order_by_desc(test_case::Column::CreatedAt)
                .order_by_desc(test_case::Column::Id),
        };

        let result = select
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test cases: {}", e)))?;

        Ok(result)
    }

    /// Apply new content to a test case, snapshotting the previous state.
    pub async fn update_test_case(
        &self,
        id: Uuid,
        data: &TestCaseData,
        actor: Uuid,
        describe: impl FnOnce(&test_case::Model) -> ActivityEvent,
    ) -> AppResult<test_case::Model> {
        let txn = self.connection().begin().await?;

        let current = TestCase::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test case {}", id)))?;

        let updated = supersede(&txn, &current, data).await?;
        log_event(&txn, actor, &describe(&updated)).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Restore a stored snapshot's content as a new version.
    ///
    /// Returns the updated test case and the snapshot that was restored;
    /// `describe(&restored)` is logged for `actor` in the same transaction.
    pub async fn rollback_test_case(
        &self,
        id: Uuid,
        version_id: Uuid,
        actor: Uuid,
        describe: impl FnOnce(&test_case_version::Model) -> ActivityEvent,
    ) -> AppResult<(test_case::Model, test_case_version::Model)> {
        let txn = self.connection().begin().await?;

        let current = TestCase::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test case {}", id)))?;

        let target = TestCaseVersion::find_by_id(version_id)
            .filter(test_case_version::Column::TestCaseId.eq(id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Version {} of test case {}", version_id, id))
            })?;

        let updated = supersede(&txn, &current, &TestCaseData::from(&target)).await?;
        log_event(&txn, actor, &describe(&target)).await?;

        txn.commit().await?;
        Ok((updated, target))
    }

    /// Delete a test case with its snapshots and run entries.
    ///
    /// Returns the deleted test case, or `None` if it did not exist. Nothing
    /// is logged for a missing test case.
    pub async fn delete_test_case(
        &self,
        id: Uuid,
        actor: Uuid,
        describe: impl FnOnce(&test_case::Model) -> ActivityEvent,
    ) -> AppResult<Option<test_case::Model>> {
        let txn = self.connection().begin().await?;

        let Some(existing) = TestCase::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        test_run_entry::Entity::delete_many()
            .filter(test_run_entry::Column::TestCaseId.eq(id))
            .exec(&txn)
            .await?;
        TestCaseVersion::delete_many()
            .filter(test_case_version::Column::TestCaseId.eq(id))
            .exec(&txn)
            .await?;
        TestCase::delete_by_id(id).exec(&txn).await?;
        log_event(&txn, actor, &describe(&existing)).await?;

        txn.commit().await?;
        Ok(Some(existing))
    }

    /// Stored snapshots of a test case, newest version first.
    pub async fn list_test_case_versions(
        &self,
        test_case_id: Uuid,
    ) -> AppResult<Vec<test_case_version::Model>> {
        let result = TestCaseVersion::find()
            .filter(test_case_version::Column::TestCaseId.eq(test_case_id))
            .order_by_desc(test_case_version::Column::Version)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list versions: {}", e)))?;

        Ok(result)
    }
}
