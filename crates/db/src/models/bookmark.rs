use sqlx::FromRow;
use taskhub_core::models::Bookmark;
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `bookmarks` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookmarkRow {
    pub user_id: DbId,
    pub task_id: DbId,
    pub created_at: Timestamp,
}

impl From<BookmarkRow> for Bookmark {
    fn from(row: BookmarkRow) -> Self {
        Self {
            user_id: row.user_id,
            task_id: row.task_id,
            created_at: row.created_at,
        }
    }
}
