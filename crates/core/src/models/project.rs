//! Project entity: belongs to exactly one workspace.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub icon: String,
    pub workspace_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /projects/w/{workspaceId}` and `PUT /projects/{id}`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub icon: String,
}
