//! Store for the `projects` table.

use sqlx::SqliteConnection;
use taskhub_core::models::Project;
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::project::ProjectRow;
use crate::store::LocalStore;

/// Column list for `projects` queries.
const COLUMNS: &str = "id, title, icon, workspace_id, created_at, updated_at";

/// Cache operations for projects.
pub struct ProjectStore;

impl ProjectStore {
    pub async fn upsert(store: &LocalStore, project: &Project) -> Result<(), StoreError> {
        Self::upsert_many(store, std::slice::from_ref(project)).await
    }

    /// Insert or replace every project in one transaction.
    pub async fn upsert_many(store: &LocalStore, projects: &[Project]) -> Result<(), StoreError> {
        if projects.is_empty() {
            return Ok(());
        }

        let mut tx = store.pool().begin().await?;
        for project in projects {
            sqlx::query(
                "INSERT INTO projects (id, title, icon, workspace_id, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                     title = excluded.title, \
                     icon = excluded.icon, \
                     workspace_id = excluded.workspace_id, \
                     created_at = excluded.created_at, \
                     updated_at = excluded.updated_at",
            )
            .bind(project.id)
            .bind(project.title.as_str())
            .bind(project.icon.as_str())
            .bind(project.workspace_id)
            .bind(project.created_at)
            .bind(project.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Projects]);
        Ok(())
    }

    pub async fn find_by_id(store: &LocalStore, id: DbId) -> Result<Option<Project>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(store.pool())
            .await?;
        Ok(row.map(Project::from))
    }

    pub async fn list_by_workspace(
        store: &LocalStore,
        workspace_id: DbId,
    ) -> Result<Vec<Project>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE workspace_id = ? ORDER BY id");
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(workspace_id)
            .fetch_all(store.pool())
            .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Delete a project together with its cached tasks, tags, and everything
    /// attached to them.
    ///
    /// Returns `false` when no project with this id was cached.
    pub async fn delete(store: &LocalStore, id: DbId) -> Result<bool, StoreError> {
        let mut tx = store.pool().begin().await?;

        delete_contents(&mut *tx, "?", id).await?;
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut tables = vec![Table::Projects];
        tables.extend_from_slice(CONTENT_TABLES);
        store.notify(&tables);
        Ok(result.rows_affected() > 0)
    }
}

/// Tables touched by [`delete_contents`].
pub(crate) const CONTENT_TABLES: &[Table] = &[
    Table::Tasks,
    Table::Tags,
    Table::TaskTags,
    Table::TaskMedia,
    Table::TaskAssigned,
    Table::Bookmarks,
    Table::Comments,
];

/// Remove the cached tasks and tags of the projects selected by `projects`,
/// along with every row that hangs off those tasks and tags.
///
/// `projects` is spliced into `IN (...)` and must bind exactly one `?`.
pub(crate) async fn delete_contents(
    conn: &mut SqliteConnection,
    projects: &str,
    id: DbId,
) -> Result<(), StoreError> {
    let tasks = format!("SELECT id FROM tasks WHERE project_id IN ({projects})");
    let tags = format!("SELECT id FROM tags WHERE project_id IN ({projects})");

    let statements = [
        format!("DELETE FROM task_tags WHERE task_id IN ({tasks})"),
        format!("DELETE FROM task_tags WHERE tag_id IN ({tags})"),
        format!("DELETE FROM task_media WHERE task_id IN ({tasks})"),
        format!("DELETE FROM task_assigned WHERE task_id IN ({tasks})"),
        format!("DELETE FROM bookmarks WHERE task_id IN ({tasks})"),
        format!("DELETE FROM comments WHERE task_id IN ({tasks})"),
        format!("DELETE FROM tasks WHERE project_id IN ({projects})"),
        format!("DELETE FROM tags WHERE project_id IN ({projects})"),
    ];
    for statement in &statements {
        sqlx::query(statement).bind(id).execute(&mut *conn).await?;
    }
    Ok(())
}
