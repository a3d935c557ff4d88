//! Dashboard summary models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counts derived from the store on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SummaryStats {
    pub total_projects: u64,
    pub total_test_cases: u64,
    /// Share of test cases in `completed` status, 0-100.
    pub completion_percentage: u32,
    pub active_test_runs: u64,
}

/// `round(100 * completed / total)`, or 0 when there is nothing to complete.
pub fn completion_percentage(completed: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}
