//! Activity log models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::activity_log;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    pub id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<activity_log::Model> for Activity {
    fn from(m: activity_log::Model) -> Self {
        Self {
            id: m.id,
            message: m.message,
            timestamp: m.timestamp,
        }
    }
}

/// Entries kept per user. Older entries are evicted on append.
pub const ACTIVITY_LOG_CAPACITY: u64 = 20;

/// A completed mutation worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEvent {
    ProjectCreated { name: String },
    ProjectUpdated { name: String },
    ProjectDeleted { name: String },
    TestCaseAdded { title: String },
    TestCasesImported { count: usize },
    TestCaseUpdated { title: String },
    TestCaseDeleted { title: String },
    TestCaseRolledBack { title: String, version: i32 },
    TestRunCreated { name: String },
}

impl fmt::Display for ActivityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectCreated { name } => write!(f, "Created project \"{}\".", name),
            Self::ProjectUpdated { name } => write!(f, "Updated project \"{}\".", name),
            Self::ProjectDeleted { name } => write!(f, "Deleted project \"{}\".", name),
            Self::TestCaseAdded { title } => write!(f, "Added test case \"{}\".", title),
            Self::TestCasesImported { count } => write!(f, "Added {} new test cases.", count),
            Self::TestCaseUpdated { title } => write!(f, "Updated test case \"{}\".", title),
            Self::TestCaseDeleted { title } => write!(f, "Deleted test case \"{}\".", title),
            Self::TestCaseRolledBack { title, version } => write!(
                f,
                "Rolled back test case \"{}\" to version {}.",
                title, version
            ),
            Self::TestRunCreated { name } => write!(f, "Created test run \"{}\".", name),
        }
    }
}
