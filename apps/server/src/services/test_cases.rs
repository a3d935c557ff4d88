//! Versioning engine: test case authoring with an append-only history.
//!
//! Every edit and rollback stores the outgoing state as a snapshot and bumps
//! the version counter in one transaction. History is never rewritten; a
//! rollback restores old content as a brand-new version.

use uuid::Uuid;

use super::projects::require_project;
use crate::db::DbPool;
use crate::entity::test_case;
use crate::error::{AppError, AppResult};
use crate::models::test_case::{build_history, refine_listing};
use crate::models::{
    ActivityEvent, ListTestCasesQuery, TestCase, TestCaseData, VersionHistoryEntry,
};

/// Load a test case whose project the user owns, or fail with `NotFound`.
pub async fn require_test_case(
    pool: &DbPool,
    user_id: Uuid,
    test_case_id: Uuid,
) -> AppResult<test_case::Model> {
    let not_found = || AppError::NotFound(format!("Test case {}", test_case_id));

    let test_case = pool.get_test_case(test_case_id).await?.ok_or_else(not_found)?;
    pool.get_project(user_id, test_case.project_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(test_case)
}

/// Create a test case at version 1.
pub async fn create_test_case(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
    data: TestCaseData,
) -> AppResult<TestCase> {
    data.validate()?;
    require_project(pool, user_id, project_id).await?;

    let test_case = pool
        .insert_test_case(project_id, &data, user_id, |tc| {
            ActivityEvent::TestCaseAdded {
                title: tc.title.clone(),
            }
        })
        .await?;

    Ok(test_case.into())
}

/// Create several test cases at once. Either all are created or none.
pub async fn bulk_create_test_cases(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
    items: Vec<TestCaseData>,
) -> AppResult<Vec<TestCase>> {
    if items.is_empty() {
        return Err(AppError::InvalidInput(
            "test_cases must contain at least one test case".to_string(),
        ));
    }
    for data in &items {
        data.validate()?;
    }
    require_project(pool, user_id, project_id).await?;

    let created = pool
        .insert_test_cases(project_id, &items, user_id, |cases| {
            ActivityEvent::TestCasesImported {
                count: cases.len(),
            }
        })
        .await?;

    Ok(created.into_iter().map(TestCase::from).collect())
}

pub async fn list_test_cases(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
    query: &ListTestCasesQuery,
) -> AppResult<Vec<TestCase>> {
    require_project(pool, user_id, project_id).await?;

    let rows = pool.list_test_cases(project_id, query).await?;
    let cases = rows.into_iter().map(TestCase::from).collect();
    Ok(refine_listing(cases, query))
}

pub async fn get_test_case(
    pool: &DbPool,
    user_id: Uuid,
    test_case_id: Uuid,
) -> AppResult<TestCase> {
    Ok(require_test_case(pool, user_id, test_case_id).await?.into())
}

/// Replace a test case's content, preserving the previous state as a snapshot.
pub async fn update_test_case(
    pool: &DbPool,
    user_id: Uuid,
    test_case_id: Uuid,
    data: TestCaseData,
) -> AppResult<TestCase> {
    data.validate()?;
    require_test_case(pool, user_id, test_case_id).await?;

    let updated = pool
        .update_test_case(test_case_id, &data, user_id, |tc| {
            ActivityEvent::TestCaseUpdated {
                title: tc.title.clone(),
            }
        })
        .await?;
    tracing::debug!(
        test_case_id = %updated.id,
        version = updated.version,
        "Test case updated"
    );

    Ok(updated.into())
}

/// Restore a snapshot's content as the next version.
pub async fn rollback_test_case(
    pool: &DbPool,
    user_id: Uuid,
    test_case_id: Uuid,
    version_id: Uuid,
) -> AppResult<TestCase> {
    require_test_case(pool, user_id, test_case_id).await?;

    let (updated, restored) = pool
        .rollback_test_case(test_case_id, version_id, user_id, |snapshot| {
            ActivityEvent::TestCaseRolledBack {
                title: snapshot.title.clone(),
                version: snapshot.version,
            }
        })
        .await?;
    tracing::debug!(
        test_case_id = %updated.id,
        restored_version = restored.version,
        version = updated.version,
        "Test case rolled back"
    );

    Ok(updated.into())
}

/// Delete a test case with its history and run entries.
///
/// Deleting an unknown test case is a no-op. A test case in another user's
/// project is reported as not found.
pub async fn delete_test_case(pool: &DbPool, user_id: Uuid, test_case_id: Uuid) -> AppResult<()> {
    let Some(existing) = pool.get_test_case(test_case_id).await? else {
        return Ok(());
    };
    if pool.get_project(user_id, existing.project_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Test case {}", test_case_id)));
    }

    pool.delete_test_case(test_case_id, user_id, |tc| ActivityEvent::TestCaseDeleted {
        title: tc.title.clone(),
    })
    .await?;
    Ok(())
}

/// Full history including the live state, newest version first.
pub async fn list_version_history(
    pool: &DbPool,
    user_id: Uuid,
    test_case_id: Uuid,
) -> AppResult<Vec<VersionHistoryEntry>> {
    let current = require_test_case(pool, user_id, test_case_id).await?;
    let snapshots = pool.list_test_case_versions(test_case_id).await?;
    Ok(build_history(&current, snapshots))
}
