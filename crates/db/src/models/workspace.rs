use sqlx::FromRow;
use taskhub_core::models::Workspace;
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `workspaces` table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkspaceRow {
    pub id: DbId,
    pub title: String,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WorkspaceRow> for Workspace {
    fn from(row: WorkspaceRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
