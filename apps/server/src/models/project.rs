//! Project domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::project;
use crate::error::AppResult;

/// Request body for creating or updating a project.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ProjectRequest {
    pub fn validate(&self) -> AppResult<()> {
        super::require_non_blank("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
