//! Project management scoped to the owning user.

use uuid::Uuid;

use crate::db::DbPool;
use crate::entity::project;
use crate::error::{AppError, AppResult};
use crate::models::{ActivityEvent, Project, ProjectRequest};

/// Load a project the user owns, or fail with `NotFound`.
pub async fn require_project(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
) -> AppResult<project::Model> {
    pool.get_project(user_id, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))
}

pub async fn create_project(
    pool: &DbPool,
    user_id: Uuid,
    request: ProjectRequest,
) -> AppResult<Project> {
    request.validate()?;

    let project = pool
        .insert_project(user_id, &request, |p| ActivityEvent::ProjectCreated {
            name: p.name.clone(),
        })
        .await?;

    Ok(project.into())
}

pub async fn list_projects(pool: &DbPool, user_id: Uuid) -> AppResult<Vec<Project>> {
    let projects = pool.list_projects(user_id).await?;
    Ok(projects.into_iter().map(Project::from).collect())
}

pub async fn get_project(pool: &DbPool, user_id: Uuid, project_id: Uuid) -> AppResult<Project> {
    Ok(require_project(pool, user_id, project_id).await?.into())
}

pub async fn update_project(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
    request: ProjectRequest,
) -> AppResult<Project> {
    request.validate()?;

    let project = pool
        .update_project(user_id, project_id, &request, |p| {
            ActivityEvent::ProjectUpdated {
                name: p.name.clone(),
            }
        })
        .await?;

    Ok(project.into())
}

/// Delete a project with all of its test cases, versions, runs, and entries.
///
/// Deleting a project that does not exist is a no-op and records nothing.
/// Another user's project is reported as not found.
pub async fn delete_project(pool: &DbPool, user_id: Uuid, project_id: Uuid) -> AppResult<()> {
    let deleted = pool
        .delete_project(user_id, project_id, |p| ActivityEvent::ProjectDeleted {
            name: p.name.clone(),
        })
        .await?;

    match deleted {
        Some(project) => {
            tracing::info!(project_id = %project.id, "Project deleted");
            Ok(())
        }
        None if pool.project_exists(project_id).await? => {
            Err(AppError::NotFound(format!("Project {}", project_id)))
        }
        None => Ok(()),
    }
}
