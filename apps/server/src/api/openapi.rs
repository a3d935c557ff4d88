//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::config::API_KEY_HEADER;
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Test Case Tracker Server",
        version = "0.1.0",
        description = "API server for authoring versioned test cases, running them in test runs, and recording outcomes"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::auth::signup,
        api::auth::login,
        api::auth::get_me,
        api::auth::update_me,
        // Project endpoints
        api::projects::create_project,
        api::projects::list_projects,
        api::projects::get_project,
        api::projects::update_project,
        api::projects::delete_project,
        // Test case endpoints
        api::test_cases::create_test_case,
        api::test_cases::bulk_create_test_cases,
        api::test_cases::list_test_cases,
        api::test_cases::get_test_case,
        api::test_cases::update_test_case,
        api::test_cases::delete_test_case,
        api::test_cases::list_versions,
        api::test_cases::rollback_test_case,
        // Test run endpoints
        api::test_runs::create_test_run,
        api::test_runs::list_test_runs,
        api::test_runs::get_test_run,
        api::test_runs::update_test_run_status,
        api::test_runs::list_entries,
        api::test_runs::record_execution,
        // Activity and summary endpoints
        api::activities::list_activities,
        api::summary::get_summary,
        api::projects::get_project_summary,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Auth
            models::SignupRequest,
            models::LoginRequest,
            models::LoginResponse,
            models::UpdateProfileRequest,
            models::UserResponse,
            // Projects
            models::ProjectRequest,
            models::Project,
            // Test cases
            models::Priority,
            models::TestCaseStatus,
            models::TestCaseData,
            models::TestCase,
            models::TestCaseSort,
            models::VersionHistoryEntry,
            models::RollbackRequest,
            models::BulkCreateTestCasesRequest,
            // Test runs
            models::TestRunStatus,
            models::ExecutionStatus,
            models::CreateTestRunRequest,
            models::RecordExecutionRequest,
            models::UpdateTestRunStatusRequest,
            models::TestRun,
            models::TestRunEntry,
            models::RunProgress,
            models::TestRunSummary,
            models::TestRunDetail,
            // Activity and summary
            models::Activity,
            models::SummaryStats,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Signup, login, and profile"),
        (name = "Projects", description = "Project management"),
        (name = "Test Cases", description = "Versioned test case authoring"),
        (name = "Test Runs", description = "Test runs and execution outcomes"),
        (name = "Activity", description = "Recent activity feed"),
        (name = "Summary", description = "Dashboard aggregates")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add API key security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(API_KEY_HEADER),
                    ),
                ),
            );
        }
    }
}
