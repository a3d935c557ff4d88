//! Test run and execution handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreateTestRunRequest, RecordExecutionRequest, TestRun, TestRunDetail, TestRunEntry,
    TestRunSummary, UpdateTestRunStatusRequest,
};
use crate::services::test_runs;

/// Create a run from a selection of the project's test cases.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/test-runs",
    tag = "Test Runs",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    request_body = CreateTestRunRequest,
    responses(
        (status = 201, description = "Test run created", body = TestRunDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn create_test_run(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<CreateTestRunRequest>,
) -> AppResult<HttpResponse> {
    let detail = test_runs::create_test_run(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(detail))
}

/// List a project's runs with progress, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/test-runs",
    tag = "Test Runs",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    responses(
        (status = 200, description = "Test runs", body = Vec<TestRunSummary>),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_test_runs(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let runs = test_runs::list_test_runs(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(runs))
}

/// Get a run with its entries.
#[utoipa::path(
    get,
    path = "/api/v1/test-runs/{test_run_id}",
    tag = "Test Runs",
    params(
        ("test_run_id" = Uuid, Path, description = "Test run UUID")
    ),
    responses(
        (status = 200, description = "Test run", body = TestRunDetail),
        (status = 404, description = "Test run not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_test_run(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = test_runs::get_test_run(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Mark a run in progress or completed.
#[utoipa::path(
    put,
    path = "/api/v1/test-runs/{test_run_id}/status",
    tag = "Test Runs",
    params(
        ("test_run_id" = Uuid, Path, description = "Test run UUID")
    ),
    request_body = UpdateTestRunStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = TestRun),
        (status = 404, description = "Test run not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn update_test_run_status(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTestRunStatusRequest>,
) -> AppResult<HttpResponse> {
    let run = test_runs::update_test_run_status(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.status,
    )
    .await?;
    Ok(HttpResponse::Ok().json(run))
}

/// Entries of a run in selection order.
#[utoipa::path(
    get,
    path = "/api/v1/test-runs/{test_run_id}/entries",
    tag = "Test Runs",
    params(
        ("test_run_id" = Uuid, Path, description = "Test run UUID")
    ),
    responses(
        (status = 200, description = "Run entries", body = Vec<TestRunEntry>),
        (status = 404, description = "Test run not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_entries(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let entries = test_runs::list_entries(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Record the outcome of one entry.
#[utoipa::path(
    put,
    path = "/api/v1/test-run-entries/{entry_id}",
    tag = "Test Runs",
    params(
        ("entry_id" = Uuid, Path, description = "Test run entry UUID")
    ),
    request_body = RecordExecutionRequest,
    responses(
        (status = 200, description = "Outcome recorded", body = TestRunEntry),
        (status = 404, description = "Entry not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn record_execution(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<RecordExecutionRequest>,
) -> AppResult<HttpResponse> {
    let entry = test_runs::record_execution(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(entry))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{project_id}/test-runs")
            .route(web::get().to(list_test_runs))
            .route(web::post().to(create_test_run)),
    )
    .service(web::resource("/test-runs/{test_run_id}").route(web::get().to(get_test_run)))
    .service(
        web::resource("/test-runs/{test_run_id}/status")
            .route(web::put().to(update_test_run_status)),
    )
    .service(web::resource("/test-runs/{test_run_id}/entries").route(web::get().to(list_entries)))
    .service(web::resource("/test-run-entries/{entry_id}").route(web::put().to(record_execution)));
}
