//! Store for the `bookmarks` table.

use taskhub_core::models::Bookmark;
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::bookmark::BookmarkRow;
use crate::store::LocalStore;

/// Cache operations for bookmarks, keyed by `(user_id, task_id)`.
pub struct BookmarkStore;

impl BookmarkStore {
    pub async fn upsert(store: &LocalStore, bookmark: &Bookmark) -> Result<(), StoreError> {
        Self::upsert_many(store, std::slice::from_ref(bookmark)).await
    }

    /// Insert or replace every bookmark in one transaction.
    pub async fn upsert_many(store: &LocalStore, bookmarks: &[Bookmark]) -> Result<(), StoreError> {
        if bookmarks.is_empty() {
            return Ok(());
        }

        let mut tx = store.pool().begin().await?;
        for bookmark in bookmarks {
            sqlx::query(
                "INSERT INTO bookmarks (user_id, task_id, created_at) VALUES (?, ?, ?) \
                 ON CONFLICT (user_id, task_id) DO UPDATE SET created_at = excluded.created_at",
            )
            .bind(bookmark.user_id)
            .bind(bookmark.task_id)
            .bind(bookmark.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Bookmarks]);
        Ok(())
    }

    pub async fn exists(store: &LocalStore, user_id: DbId, task_id: DbId) -> Result<bool, StoreError> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM bookmarks WHERE user_id = ? AND task_id = ?")
                .bind(user_id)
                .bind(task_id)
                .fetch_optional(store.pool())
                .await?;
        Ok(found.is_some())
    }

    pub async fn list_by_user(store: &LocalStore, user_id: DbId) -> Result<Vec<Bookmark>, StoreError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            "SELECT user_id, task_id, created_at FROM bookmarks \
             WHERE user_id = ? ORDER BY created_at DESC, task_id",
        )
        .bind(user_id)
        .fetch_all(store.pool())
        .await?;
        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    /// Task ids bookmarked by `user_id` whose task is not cached.
    pub async fn missing_task_ids(store: &LocalStore, user_id: DbId) -> Result<Vec<DbId>, StoreError> {
        let ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT b.task_id FROM bookmarks b \
             LEFT JOIN tasks t ON t.id = b.task_id \
             WHERE b.user_id = ? AND t.id IS NULL \
             ORDER BY b.task_id",
        )
        .bind(user_id)
        .fetch_all(store.pool())
        .await?;
        Ok(ids)
    }

    /// Absent rows are a no-op. Returns whether a row was removed.
    pub async fn delete(store: &LocalStore, user_id: DbId, task_id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = ? AND task_id = ?")
            .bind(user_id)
            .bind(task_id)
            .execute(store.pool())
            .await?;

        store.notify(&[Table::Bookmarks]);
        Ok(result.rows_affected() > 0)
    }
}
