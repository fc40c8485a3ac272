use sqlx::FromRow;
use taskhub_core::models::Comment;
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub task_id: DbId,
    pub edited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            author_id: row.author_id,
            task_id: row.task_id,
            edited: row.edited,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
