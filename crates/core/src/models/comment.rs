//! Comment entity: authored by a user on a task.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub task_id: DbId,
    #[serde(default)]
    pub edited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /comments/t/{taskId}` and `PUT /comments/{id}`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}
