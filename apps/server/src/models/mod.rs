//! Domain models and request/response DTOs.

pub mod activity;
pub mod project;
pub mod summary;
pub mod test_case;
pub mod test_run;
pub mod user;

// Re-export commonly used types
pub use activity::{Activity, ActivityEvent};
pub use project::{Project, ProjectRequest};
pub use summary::{SummaryStats, completion_percentage};
pub use test_case::{
    BulkCreateTestCasesRequest, ListTestCasesQuery, Priority, RollbackRequest, TestCase,
    TestCaseData, TestCaseSort, TestCaseStatus, VersionHistoryEntry,
};
pub use test_run::{
    CreateTestRunRequest, ExecutionStatus, RecordExecutionRequest, RunProgress, TestRun,
    TestRunDetail, TestRunEntry, TestRunStatus, TestRunSummary, UpdateTestRunStatusRequest,
};
pub use user::{
    AuthenticatedUser, LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest,
    UserResponse,
};

/// Reject blank required text fields.
pub(crate) fn require_non_blank(field: &str, value: &str) -> crate::error::AppResult<()> {
    if value.trim().is_empty() {
        return Err(crate::error::AppError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
