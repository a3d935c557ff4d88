//! Test case and version history handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    BulkCreateTestCasesRequest, ListTestCasesQuery, RollbackRequest, TestCase, TestCaseData,
    VersionHistoryEntry,
};
use crate::services::test_cases;

/// Create a test case at version 1.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/test-cases",
    tag = "Test Cases",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    request_body = TestCaseData,
    responses(
        (status = 201, description = "Test case created", body = TestCase),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn create_test_case(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<TestCaseData>,
) -> AppResult<HttpResponse> {
    let test_case = test_cases::create_test_case(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(test_case))
}

/// Create several test cases in one request. All or nothing.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/test-cases/bulk",
    tag = "Test Cases",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID")
    ),
    request_body = BulkCreateTestCasesRequest,
    responses(
        (status = 201, description = "Test cases created", body = Vec<TestCase>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn bulk_create_test_cases(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<BulkCreateTestCasesRequest>,
) -> AppResult<HttpResponse> {
    let created = test_cases::bulk_create_test_cases(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.into_inner().test_cases,
    )
    .await?;
    Ok(HttpResponse::Created().json(created))
}

/// List a project's test cases with optional filters.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/test-cases",
    tag = "Test Cases",
    params(
        ("project_id" = Uuid, Path, description = "Project UUID"),
        ListTestCasesQuery
    ),
    responses(
        (status = 200, description = "Test cases", body = Vec<TestCase>),
        (status = 404, description = "Project not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_test_cases(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    query: web::Query<ListTestCasesQuery>,
) -> AppResult<HttpResponse> {
    let cases =
        test_cases::list_test_cases(pool.get_ref(), user.id(), path.into_inner(), &query).await?;
    Ok(HttpResponse::Ok().json(cases))
}

/// Get a test case.
#[utoipa::path(
    get,
    path = "/api/v1/test-cases/{test_case_id}",
    tag = "Test Cases",
    params(
        ("test_case_id" = Uuid, Path, description = "Test case UUID")
    ),
    responses(
        (status = 200, description = "Test case", body = TestCase),
        (status = 404, description = "Test case not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_test_case(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let test_case = test_cases::get_test_case(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(test_case))
}

/// Edit a test case. The previous content is kept as a version snapshot.
#[utoipa::path(
    put,
    path = "/api/v1/test-cases/{test_case_id}",
    tag = "Test Cases",
    params(
        ("test_case_id" = Uuid, Path, description = "Test case UUID")
    ),
    request_body = TestCaseData,
    responses(
        (status = 200, description = "Test case updated", body = TestCase),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Test case not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn update_test_case(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<TestCaseData>,
) -> AppResult<HttpResponse> {
    let test_case = test_cases::update_test_case(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(test_case))
}

/// Delete a test case with its history and run entries. Unknown ids are a no-op.
#[utoipa::path(
    delete,
    path = "/api/v1/test-cases/{test_case_id}",
    tag = "Test Cases",
    params(
        ("test_case_id" = Uuid, Path, description = "Test case UUID")
    ),
    responses(
        (status = 204, description = "Test case deleted"),
        (status = 404, description = "Test case belongs to another user", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn delete_test_case(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    test_cases::delete_test_case(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Version history including the live state, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/test-cases/{test_case_id}/versions",
    tag = "Test Cases",
    params(
        ("test_case_id" = Uuid, Path, description = "Test case UUID")
    ),
    responses(
        (status = 200, description = "Version history", body = Vec<VersionHistoryEntry>),
        (status = 404, description = "Test case not found", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_versions(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let history =
        test_cases::list_version_history(pool.get_ref(), user.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// Restore a stored version's content as a new version.
#[utoipa::path(
    post,
    path = "/api/v1/test-cases/{test_case_id}/rollback",
    tag = "Test Cases",
    params(
        ("test_case_id" = Uuid, Path, description = "Test case UUID")
    ),
    request_body = RollbackRequest,
    responses(
        (status = 200, description = "Test case rolled back", body = TestCase),
        (status = 404, description = "Test case or version not found", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn rollback_test_case(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<RollbackRequest>,
) -> AppResult<HttpResponse> {
    let test_case = test_cases::rollback_test_case(
        pool.get_ref(),
        user.id(),
        path.into_inner(),
        body.version_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(test_case))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{project_id}/test-cases")
            .route(web::get().to(list_test_cases))
            .route(web::post().to(create_test_case)),
    )
    .service(
        web::resource("/projects/{project_id}/test-cases/bulk")
            .route(web::post().to(bulk_create_test_cases)),
    )
    .service(
        web::resource("/test-cases/{test_case_id}")
            .route(web::get().to(get_test_case))
            .route(web::put().to(update_test_case))
            .route(web::delete().to(delete_test_case)),
    )
    .service(web::resource("/test-cases/{test_case_id}/versions").route(web::get().to(list_versions)))
    .service(
        web::resource("/test-cases/{test_case_id}/rollback")
            .route(web::post().to(rollback_test_case)),
    );
}
