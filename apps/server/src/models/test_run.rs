//! Test run domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{test_run, test_run_entry};
use crate::error::AppResult;

pub use crate::entity::test_run::TestRunStatus;
pub use crate::entity::test_run_entry::ExecutionStatus;

/// Request to create a test run from a selection of test cases.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateTestRunRequest {
    pub name: String,
    /// Name of the person assigned to execute the run.
    pub tester: String,
    /// Selected test cases. Order is kept; duplicates collapse.
    pub test_case_ids: Vec<Uuid>,
}

impl CreateTestRunRequest {
    pub fn validate(&self) -> AppResult<()> {
        super::require_non_blank("name", &self.name)?;
        super::require_non_blank("tester", &self.tester)?;
        if self.test_case_ids.is_empty() {
            return Err(crate::error::AppError::InvalidInput(
                "test_case_ids must select at least one test case".to_string(),
            ));
        }
        Ok(())
    }
}

/// Remove repeated ids, keeping the first occurrence of each.
pub fn dedup_preserving_order(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Request to record the outcome of one entry.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecordExecutionRequest {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub comments: String,
}

/// Request to set a run's status by hand.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateTestRunStatusRequest {
    pub status: TestRunStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestRun {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub tester: String,
    pub status: TestRunStatus,
    pub created_at: DateTime<Utc>,
}

impl From<test_run::Model> for TestRun {
    fn from(m: test_run::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            name: m.name,
            tester: m.tester,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestRunEntry {
    pub id: Uuid,
    pub test_run_id: Uuid,
    pub test_case_id: Uuid,
    pub status: ExecutionStatus,
    pub comments: String,
    pub executed_at: Option<DateTime<Utc>>,
}

impl From<test_run_entry::Model> for TestRunEntry {
    fn from(m: test_run_entry::Model) -> Self {
        Self {
            id: m.id,
            test_run_id: m.test_run_id,
            test_case_id: m.test_case_id,
            status: m.status,
            comments: m.comments,
            executed_at: m.executed_at,
        }
    }
}

/// Outcome counts over a run's entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RunProgress {
    pub total: u32,
    pub not_run: u32,
    pub passed: u32,
    pub failed: u32,
    pub blocked: u32,
}

impl RunProgress {
    pub fn add(&mut self, status: ExecutionStatus) {
        self.total += 1;
        match status {
            ExecutionStatus::NotRun => self.not_run += 1,
            ExecutionStatus::Passed => self.passed += 1,
            ExecutionStatus::Failed => self.failed += 1,
            ExecutionStatus::Blocked => self.blocked += 1,
        }
    }

    /// Entries with a recorded outcome.
    pub fn executed(&self) -> u32 {
        self.total - self.not_run
    }
}

impl FromIterator<ExecutionStatus> for RunProgress {
    fn from_iter<I: IntoIterator<Item = ExecutionStatus>>(iter: I) -> Self {
        let mut progress = RunProgress::default();
        for status in iter {
            progress.add(status);
        }
        progress
    }
}

/// A run with its progress, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestRunSummary {
    #[serde(flatten)]
    pub run: TestRun,
    pub progress: RunProgress,
}

/// A run with all of its entries in selection order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestRunDetail {
    #[serde(flatten)]
    pub run: TestRun,
    pub progress: RunProgress,
    pub entries: Vec<TestRunEntry>,
}
