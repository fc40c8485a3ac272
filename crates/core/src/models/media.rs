//! Media entity and its task join row.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: DbId,
    pub filename: String,
    /// MIME-like kind reported by the server, e.g. `"image/png"`.
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row of the `task_media` join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMedia {
    pub task_id: DbId,
    pub media_id: DbId,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}
