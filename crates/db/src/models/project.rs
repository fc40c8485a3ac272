use sqlx::FromRow;
use taskhub_core::models::Project;
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub title: String,
    pub icon: String,
    pub workspace_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            icon: row.icon,
            workspace_id: row.workspace_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
