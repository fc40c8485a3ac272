//! Store for the `media` and `task_media` tables.

use taskhub_core::models::Media;
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::media::MediaRow;
use crate::store::LocalStore;

/// Cache operations for media attached to tasks.
pub struct MediaStore;

impl MediaStore {
    /// Replace the cached media of a task with the server's list.
    ///
    /// Media rows are upserted; associations not in `media` are removed.
    pub async fn replace_for_task(
        store: &LocalStore,
        task_id: DbId,
        media: &[Media],
    ) -> Result<(), StoreError> {
        let mut tx = store.pool().begin().await?;

        sqlx::query("DELETE FROM task_media WHERE task_id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;
        for item in media {
            sqlx::query(
                "INSERT INTO media (id, filename, media_type, url, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                     filename = excluded.filename, \
                     media_type = excluded.media_type, \
                     url = excluded.url, \
                     created_at = excluded.created_at, \
                     updated_at = excluded.updated_at",
            )
            .bind(item.id)
            .bind(item.filename.as_str())
            .bind(item.media_type.as_str())
            .bind(item.url.as_str())
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;
            sqlx::query(
                "INSERT INTO task_media (task_id, media_id) VALUES (?, ?) \
                 ON CONFLICT (task_id, media_id) DO NOTHING",
            )
            .bind(task_id)
            .bind(item.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        store.notify(&[Table::Media, Table::TaskMedia]);
        Ok(())
    }

    /// Cached media attached to a task.
    pub async fn list_by_task(store: &LocalStore, task_id: DbId) -> Result<Vec<Media>, StoreError> {
        let rows = sqlx::query_as::<_, MediaRow>(
            "SELECT m.id, m.filename, m.media_type, m.url, m.created_at, m.updated_at \
             FROM media m \
             JOIN task_media tm ON tm.media_id = m.id \
             WHERE tm.task_id = ? \
             ORDER BY m.id",
        )
        .bind(task_id)
        .fetch_all(store.pool())
        .await?;
        Ok(rows.into_iter().map(Media::from).collect())
    }

    /// Delete a media row and detach it from every task.
    ///
    /// Returns `false` when no media with this id was cached.
    pub async fn delete(store: &LocalStore, id: DbId) -> Result<bool, StoreError> {
        let mut tx = store.pool().begin().await?;

        sqlx::query("DELETE FROM task_media WHERE media_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM media WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        store.notify(&[Table::Media, Table::TaskMedia]);
        Ok(result.rows_affected() > 0)
    }
}
