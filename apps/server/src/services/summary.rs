//! Summary/query layer: aggregates derived from current store contents.

use uuid::Uuid;

use super::projects::require_project;
use crate::db::DbPool;
use crate::db::summary::ProjectCounts;
use crate::error::AppResult;
use crate::models::{SummaryStats, completion_percentage};

fn to_stats(total_projects: u64, counts: ProjectCounts) -> SummaryStats {
    SummaryStats {
        total_projects,
        total_test_cases: counts.test_cases,
        completion_percentage: completion_percentage(
            counts.completed_test_cases,
            counts.test_cases,
        ),
        active_test_runs: counts.active_test_runs,
    }
}

/// Dashboard totals across all of a user's projects.
pub async fn user_summary(pool: &DbPool, user_id: Uuid) -> AppResult<SummaryStats> {
    let project_ids = pool.list_project_ids(user_id).await?;
    let counts = pool.count_for_projects(&project_ids).await?;
    Ok(to_stats(project_ids.len() as u64, counts))
}

/// Totals for a single project.
pub async fn project_summary(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
) -> AppResult<SummaryStats> {
    let project = require_project(pool, user_id, project_id).await?;
    let counts = pool.count_for_projects(&[project.id]).await?;
    Ok(to_stats(1, counts))
}
