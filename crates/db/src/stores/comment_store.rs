//! Store for the `comments` table.

use taskhub_core::models::Comment;
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::comment::CommentRow;
use crate::store::LocalStore;

/// Column list for `comments` queries.
const COLUMNS: &str = "id, content, author_id, task_id, edited, created_at, updated_at";

/// Cache operations for comments.
pub struct CommentStore;

impl CommentStore {
    pub async fn upsert(store: &LocalStore, comment: &Comment) -> Result<(), StoreError> {
        Self::upsert_many(store, std::slice::from_ref(comment)).await
    }

    /// Insert or replace every comment in one transaction.
    pub async fn upsert_many(store: &LocalStore, comments: &[Comment]) -> Result<(), StoreError> {
        if comments.is_empty() {
            return Ok(());
        }

        let mut tx = store.pool().begin().await?;
        for comment in comments {
            sqlx::query(
                "INSERT INTO comments (id, content, author_id, task_id, edited, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                     content = excluded.content, \
                     author_id = excluded.author_id, \
                     task_id = excluded.task_id, \
                     edited = excluded.edited, \
                     created_at = excluded.created_at, \
                     updated_at = excluded.updated_at",
            )
            .bind(comment.id)
            .bind(comment.content.as_str())
            .bind(comment.author_id)
            .bind(comment.task_id)
            .bind(comment.edited)
            .bind(comment.created_at)
            .bind(comment.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Comments]);
        Ok(())
    }

    pub async fn find_by_id(store: &LocalStore, id: DbId) -> Result<Option<Comment>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = ?");
        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(id)
            .fetch_optional(store.pool())
            .await?;
        Ok(row.map(Comment::from))
    }

    /// Comments on a task in posting order.
    pub async fn list_by_task(store: &LocalStore, task_id: DbId) -> Result<Vec<Comment>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE task_id = ? ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, CommentRow>(&query)
            .bind(task_id)
            .fetch_all(store.pool())
            .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// Returns `false` when no comment with this id was cached.
    pub async fn delete(store: &LocalStore, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(store.pool())
            .await?;

        store.notify(&[Table::Comments]);
        Ok(result.rows_affected() > 0)
    }
}
