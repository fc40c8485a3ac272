use sqlx::FromRow;
use taskhub_core::models::{Color, Tag};
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
///
/// SQLite has no unsigned integers; the packed RGBA value is stored as a
/// non-negative `INTEGER`.
#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: DbId,
    pub title: String,
    pub color: i64,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            color: Color(u32::try_from(row.color).unwrap_or_default()),
            project_id: row.project_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
