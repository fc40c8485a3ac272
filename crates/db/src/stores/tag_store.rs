//! Store for the `tags` and `task_tags` tables.

use sqlx::SqliteConnection;
use taskhub_core::models::{Tag, TaskTag};
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::tag::TagRow;
use crate::store::LocalStore;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, title, color, project_id, created_at, updated_at";

/// Cache operations for tags and tag-task associations.
pub struct TagStore;

impl TagStore {
    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    pub async fn upsert(store: &LocalStore, tag: &Tag) -> Result<(), StoreError> {
        Self::upsert_many(store, std::slice::from_ref(tag)).await
    }

    /// Insert or replace every tag in one transaction.
    pub async fn upsert_many(store: &LocalStore, tags: &[Tag]) -> Result<(), StoreError> {
        if tags.is_empty() {
            return Ok(());
        }

        let mut tx = store.pool().begin().await?;
        for tag in tags {
            upsert_tag(&mut *tx, tag).await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Tags]);
        Ok(())
    }

    pub async fn find_by_id(store: &LocalStore, id: DbId) -> Result<Option<Tag>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = ?");
        let row = sqlx::query_as::<_, TagRow>(&query)
            .bind(id)
            .fetch_optional(store.pool())
            .await?;
        Ok(row.map(Tag::from))
    }

    pub async fn list_by_project(store: &LocalStore, project_id: DbId) -> Result<Vec<Tag>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE project_id = ? ORDER BY id");
        let rows = sqlx::query_as::<_, TagRow>(&query)
            .bind(project_id)
            .fetch_all(store.pool())
            .await?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    /// Cached tags attached to a task.
    pub async fn list_by_task(store: &LocalStore, task_id: DbId) -> Result<Vec<Tag>, StoreError> {
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT g.id, g.title, g.color, g.project_id, g.created_at, g.updated_at \
             FROM tags g \
             JOIN task_tags tt ON tt.tag_id = g.id \
             WHERE tt.task_id = ? \
             ORDER BY g.id",
        )
        .bind(task_id)
        .fetch_all(store.pool())
        .await?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    /// Delete a tag and detach it from every task.
    ///
    /// Returns `false` when no tag with this id was cached.
    pub async fn delete(store: &LocalStore, id: DbId) -> Result<bool, StoreError> {
        let mut tx = store.pool().begin().await?;

        sqlx::query("DELETE FROM task_tags WHERE tag_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        store.notify(&[Table::Tags, Table::TaskTags]);
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Task associations
    // -----------------------------------------------------------------------

    pub async fn attach(store: &LocalStore, link: &TaskTag) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO task_tags (task_id, tag_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (task_id, tag_id) DO UPDATE SET created_at = excluded.created_at",
        )
        .bind(link.task_id)
        .bind(link.tag_id)
        .bind(link.created_at)
        .execute(store.pool())
        .await?;

        store.notify(&[Table::TaskTags]);
        Ok(())
    }

    /// Remove a tag from a task. Absent rows are a no-op.
    pub async fn detach(store: &LocalStore, task_id: DbId, tag_id: DbId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM task_tags WHERE task_id = ? AND tag_id = ?")
            .bind(task_id)
            .bind(tag_id)
            .execute(store.pool())
            .await?;

        store.notify(&[Table::TaskTags]);
        Ok(())
    }

    /// Replace the cached tags of a task with the server's list.
    ///
    /// Tags are upserted; associations not in `tags` are removed.
    pub async fn replace_for_task(
        store: &LocalStore,
        task_id: DbId,
        tags: &[Tag],
    ) -> Result<(), StoreError> {
        let mut tx = store.pool().begin().await?;

        sqlx::query("DELETE FROM task_tags WHERE task_id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;
        for tag in tags {
            upsert_tag(&mut *tx, tag).await?;
            sqlx::query(
                "INSERT INTO task_tags (task_id, tag_id) VALUES (?, ?) \
                 ON CONFLICT (task_id, tag_id) DO NOTHING",
            )
            .bind(task_id)
            .bind(tag.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        store.notify(&[Table::Tags, Table::TaskTags]);
        Ok(())
    }
}

async fn upsert_tag(conn: &mut SqliteConnection, tag: &Tag) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO tags (id, title, color, project_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) \
         ON CONFLICT (id) DO UPDATE SET \
             title = excluded.title, \
             color = excluded.color, \
             project_id = excluded.project_id, \
             created_at = excluded.created_at, \
             updated_at = excluded.updated_at",
    )
    .bind(tag.id)
    .bind(tag.title.as_str())
    .bind(i64::from(tag.color.0))
    .bind(tag.project_id)
    .bind(tag.created_at)
    .bind(tag.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}
