//! Task entity, its status enumeration, and the assignment join row.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_DOING: &str = "DOING";
pub const STATUS_DONE: &str = "DONE";

/// Task progress. Unknown wire values decode to [`TaskStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Doing => STATUS_DOING,
            Self::Done => STATUS_DONE,
        }
    }

    /// Parse case-insensitively, falling back to [`TaskStatus::Pending`].
    pub fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            STATUS_DOING => Self::Doing,
            STATUS_DONE => Self::Done,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values such as null or numbers take the fallback too.
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(raw.as_str().unwrap_or_default()))
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
    /// Tracked time in seconds.
    #[serde(default)]
    pub timer: Option<i64>,
    #[serde(default)]
    pub status: TaskStatus,
    pub project_id: DbId,
    /// Display path, e.g. `"Acme / Website"`. Computed by the server.
    #[serde(default)]
    pub breadcrumb: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /tasks/p/{projectId}` and `PUT /tasks/{id}`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
}

impl TaskInput {
    /// A pending task with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            deadline: None,
        }
    }
}

/// A row of the `task_assigned` join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssigned {
    pub task_id: DbId,
    pub user_id: DbId,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}
