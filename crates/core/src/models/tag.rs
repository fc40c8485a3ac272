//! Tag entity, its RGBA color, and the task join row.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// RGBA color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_be_bytes([r, g, b, a]))
    }

    /// The `[r, g, b, a]` channels.
    pub fn channels(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// `#RRGGBBAA` hex notation.
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: DbId,
    pub title: String,
    pub color: Color,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /tags/p/{projectId}` and `PUT /tags/{id}`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TagInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub color: Color,
}

/// A row of the `task_tags` join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTag {
    pub task_id: DbId,
    pub tag_id: DbId,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}
