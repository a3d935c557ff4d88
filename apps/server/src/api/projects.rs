//! Project API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{Project, ProjectRequest, SummaryStats};
use crate::services::{projects, summary};

/// Create a project.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn create_project(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    body: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    let project = projects::create_project(pool.get_ref(), user.id(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

/// List the current user's projects, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "Projects", body = Vec<Project>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_projects(user: CurrentUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let projects = projects::list_projects(pool.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Get a project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_project(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let project = projects::get_project(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Rename or re-describe a project.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn update_project(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    let project = projects::update_project(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Delete a project and everything in it. Unknown ids are a no-op.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn delete_project(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    projects::delete_project(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Totals for one project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/summary",
    tag = "Summary",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    responses(
        (status = 200, description = "Project totals", body = SummaryStats),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_project_summary(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let stats = summary::project_summary(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource("/projects/{project_id}")
            .route(web::get().to(get_project))
            .route(web::put().to(update_project))
            .route(web::delete().to(delete_project)),
    )
    .service(
        web::resource("/projects/{project_id}/summary").route(web::get().to(get_project_summary)),
    );
}
