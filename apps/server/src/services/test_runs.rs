//! Test run engine: fixed-membership runs with per-entry outcomes.
//!
//! Recording an outcome writes only the entry. The test case it points at,
//! including its own status and version history, is never touched.

use uuid::Uuid;

use super::projects::require_project;
use crate::db::DbPool;
use crate::entity::test_run;
use crate::error::{AppError, AppResult};
use crate::models::test_run::dedup_preserving_order;
use crate::models::{
    ActivityEvent, CreateTestRunRequest, RecordExecutionRequest, RunProgress, TestRun,
    TestRunDetail, TestRunEntry, TestRunStatus, TestRunSummary,
};

/// Load a run whose project the user owns, or fail with `NotFound`.
pub async fn require_test_run(
    pool: &DbPool,
    user_id: Uuid,
    test_run_id: Uuid,
) -> AppResult<test_run::Model> {
    let not_found = || AppError::NotFound(format!("Test run {}", test_run_id));

    let run = pool.get_test_run(test_run_id).await?.ok_or_else(not_found)?;
    pool.get_project(user_id, run.project_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(run)
}

/// Create a run over the selected test cases.
///
/// Duplicate ids collapse to one entry; entries follow the order of first
/// appearance.
pub async fn create_test_run(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
    request: CreateTestRunRequest,
) -> AppResult<TestRunDetail> {
    request.validate()?;
    require_project(pool, user_id, project_id).await?;

    let test_case_ids = dedup_preserving_order(&request.test_case_ids);
    let (run, entries) = pool
        .insert_test_run(
            project_id,
            &request.name,
            &request.tester,
            &test_case_ids,
            user_id,
            |run| ActivityEvent::TestRunCreated {
                name: run.name.clone(),
            },
        )
        .await?;

    tracing::info!(
        test_run_id = %run.id,
        entries = entries.len(),
        "Test run created"
    );

    let progress: RunProgress = entries.iter().map(|e| e.status).collect();
    Ok(TestRunDetail {
        run: run.into(),
        progress,
        entries: entries.into_iter().map(TestRunEntry::from).collect(),
    })
}

/// A project's runs with progress counts, newest first.
pub async fn list_test_runs(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
) -> AppResult<Vec<TestRunSummary>> {
    require_project(pool, user_id, project_id).await?;

    let runs = pool.list_test_runs(project_id).await?;
    let ids: Vec<Uuid> = runs.iter().map(|r| r.id).collect();
    let mut progress = pool.get_run_progress(&ids).await?;

    Ok(runs
        .into_iter()
        .map(|run| TestRunSummary {
            progress: progress.remove(&run.id).unwrap_or_default(),
            run: run.into(),
        })
        .collect())
}

pub async fn get_test_run(
    pool: &DbPool,
    user_id: Uuid,
    test_run_id: Uuid,
) -> AppResult<TestRunDetail> {
    let run = require_test_run(pool, user_id, test_run_id).await?;
    let entries = pool.list_test_run_entries(run.id).await?;

    let progress: RunProgress = entries.iter().map(|e| e.status).collect();
    Ok(TestRunDetail {
        run: run.into(),
        progress,
        entries: entries.into_iter().map(TestRunEntry::from).collect(),
    })
}

/// Entries of a run in selection order.
pub async fn list_entries(
    pool: &DbPool,
    user_id: Uuid,
    test_run_id: Uuid,
) -> AppResult<Vec<TestRunEntry>> {
    let run = require_test_run(pool, user_id, test_run_id).await?;
    let entries = pool.list_test_run_entries(run.id).await?;
    Ok(entries.into_iter().map(TestRunEntry::from).collect())
}

/// Record the outcome of one entry.
pub async fn record_execution(
    pool: &DbPool,
    user_id: Uuid,
    entry_id: Uuid,
    request: RecordExecutionRequest,
) -> AppResult<TestRunEntry> {
    let not_found = || AppError::NotFound(format!("Test run entry {}", entry_id));

    let entry = pool.get_test_run_entry(entry_id).await?.ok_or_else(not_found)?;
    require_test_run(pool, user_id, entry.test_run_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => not_found(),
            other => other,
        })?;

    let updated = pool
        .record_execution(entry_id, request.status, &request.comments)
        .await?;

    Ok(updated.into())
}

/// Set a run's status by hand. Runs never complete on their own.
pub async fn update_test_run_status(
    pool: &DbPool,
    user_id: Uuid,
    test_run_id: Uuid,
    status: TestRunStatus,
) -> AppResult<TestRun> {
    require_test_run(pool, user_id, test_run_id).await?;

    let run = pool.update_test_run_status(test_run_id, status).await?;

    if status == TestRunStatus::Completed {
        let progress = pool
            .get_run_progress(&[run.id])
            .await?
            .remove(&run.id)
            .unwrap_or_default();
        tracing::info!(
            test_run_id = %run.id,
            executed = progress.executed(),
            total = progress.total,
            "Test run completed"
        );
    }

    Ok(run.into())
}
