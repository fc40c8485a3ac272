//! Workspace entity: the root of the hierarchy, owned by a user.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: DbId,
    pub title: String,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /workspaces` and `PUT /workspaces/{id}`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}
