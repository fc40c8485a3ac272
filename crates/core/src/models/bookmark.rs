//! Bookmark: a (user, task) pair whose existence is the fact.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub user_id: DbId,
    pub task_id: DbId,
    pub created_at: Timestamp,
}
