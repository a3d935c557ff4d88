//! Test case domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::{test_case, test_case_version};
use crate::error::AppResult;

pub use crate::entity::test_case::{Priority, TestCaseStatus};

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_status() -> TestCaseStatus {
    TestCaseStatus::NotStarted
}

/// The versioned content of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestCaseData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: TestCaseStatus,
}

impl TestCaseData {
    pub fn validate(&self) -> AppResult<()> {
        super::require_non_blank("title", &self.title)
    }
}

impl From<&test_case::Model> for TestCaseData {
    fn from(m: &test_case::Model) -> Self {
        Self {
            title: m.title.clone(),
            description: m.description.clone(),
            priority: m.priority,
            status: m.status,
        }
    }
}

impl From<&test_case_version::Model> for TestCaseData {
    fn from(v: &test_case_version::Model) -> Self {
        Self {
            title: v.title.clone(),
            description: v.description.clone(),
            priority: v.priority,
            status: v.status,
        }
    }
}

/// Live test case as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestCase {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TestCaseStatus,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<test_case::Model> for TestCase {
    fn from(m: test_case::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            title: m.title,
            description: m.description,
            priority: m.priority,
            status: m.status,
            version: m.version,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// One record of a test case's history.
///
/// The live state is included as the record with `is_current = true` and no
/// `version_id`; every other record is a stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionHistoryEntry {
    /// Snapshot id to pass to rollback. `None` for the live state.
    pub version_id: Option<Uuid>,
    pub version: i32,
    pub data: TestCaseData,
    pub changed_at: DateTime<Utc>,
    pub is_current: bool,
}

/// Merge the live test case with its snapshots, newest version first.
///
/// Snapshots at or above the live version are dropped: they belong to an edit
/// that committed after `current` was read.
pub fn build_history(
    current: &test_case::Model,
    snapshots: Vec<test_case_version::Model>,
) -> Vec<VersionHistoryEntry> {
    let mut history: Vec<VersionHistoryEntry> = snapshots
        .iter()
        .filter(|v| v.version < current.version)
        .map(|v| VersionHistoryEntry {
            version_id: Some(v.id),
            version: v.version,
            data: TestCaseData::from(v),
            changed_at: v.changed_at,
            is_current: false,
        })
        .collect();

    history.push(VersionHistoryEntry {
        version_id: None,
        version: current.version,
        data: TestCaseData::from(current),
        changed_at: current.updated_at,
        is_current: true,
    });

    history.sort_by(|a, b| b.version.cmp(&a.version));
    history
}

/// Sort order for test case listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TestCaseSort {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
    PriorityDesc,
    PriorityAsc,
}

/// Query parameters for listing a project's test cases.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTestCasesQuery {
    /// Only test cases with this status.
    pub status: Option<TestCaseStatus>,
    /// Only test cases with this priority.
    pub priority: Option<Priority>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    /// Sort order (default: created_at_desc).
    pub sort: Option<TestCaseSort>,
}

impl ListTestCasesQuery {
    pub fn sort(&self) -> TestCaseSort {
        self.sort.unwrap_or_default()
    }

    /// Search term, lowercased. Blank terms match everything.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Apply the in-memory part of a listing query: text search and priority ordering.
///
/// `cases` must already be in creation order matching the requested direction;
/// the priority sort is stable so ties keep that order.
pub fn refine_listing(mut cases: Vec<TestCase>, query: &ListTestCasesQuery) -> Vec<TestCase> {
    if let Some(term) = query.search_term() {
        cases.retain(|tc| {
            tc.title.to_lowercase().contains(&term) || tc.description.to_lowercase().contains(&term)
        });
    }

    match query.sort() {
        TestCaseSort::PriorityDesc => cases.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        TestCaseSort::PriorityAsc => cases.sort_by_key(|tc| tc.priority.rank()),
        TestCaseSort::CreatedAtDesc | TestCaseSort::CreatedAtAsc => {}
    }

    cases
}

/// Request to roll a test case back to a stored snapshot.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RollbackRequest {
    pub version_id: Uuid,
}

/// Request to create several test cases at once.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkCreateTestCasesRequest {
    pub test_cases: Vec<TestCaseData>,
}
