//! Store for the `workspaces` table.

use sqlx::SqliteConnection;
use taskhub_core::models::Workspace;
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::workspace::WorkspaceRow;
use crate::store::LocalStore;
use crate::stores::project_store;

/// Column list for `workspaces` queries.
const COLUMNS: &str = "id, title, owner_id, created_at, updated_at";

/// Cache operations for workspaces.
pub struct WorkspaceStore;

impl WorkspaceStore {
    pub async fn upsert(store: &LocalStore, workspace: &Workspace) -> Result<(), StoreError> {
        Self::upsert_many(store, std::slice::from_ref(workspace)).await
    }

    /// Insert or replace every workspace in one transaction.
    pub async fn upsert_many(store: &LocalStore, workspaces: &[Workspace]) -> Result<(), StoreError> {
        if workspaces.is_empty() {
            return Ok(());
        }

        let mut tx = store.pool().begin().await?;
        for workspace in workspaces {
            upsert_in(&mut *tx, workspace).await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Workspaces]);
        Ok(())
    }

    /// Store the server's workspace list for `user_id`, replacing the
    /// previous list for that user.
    pub async fn replace_for_user(
        store: &LocalStore,
        user_id: DbId,
        workspaces: &[Workspace],
    ) -> Result<(), StoreError> {
        let mut tx = store.pool().begin().await?;

        sqlx::query("DELETE FROM user_workspaces WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        for workspace in workspaces {
            upsert_in(&mut *tx, workspace).await?;
            sqlx::query(
                "INSERT INTO user_workspaces (user_id, workspace_id) VALUES (?, ?) \
                 ON CONFLICT (user_id, workspace_id) DO NOTHING",
            )
            .bind(user_id)
            .bind(workspace.id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Workspaces, Table::UserWorkspaces]);
        Ok(())
    }

    pub async fn find_by_id(store: &LocalStore, id: DbId) -> Result<Option<Workspace>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = ?");
        let row = sqlx::query_as::<_, WorkspaceRow>(&query)
            .bind(id)
            .fetch_optional(store.pool())
            .await?;
        Ok(row.map(Workspace::from))
    }

    /// Workspaces `user_id` owns, is a cached member of, or was last
    /// listed by the server for them, oldest first.
    pub async fn list_for_user(store: &LocalStore, user_id: DbId) -> Result<Vec<Workspace>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM workspaces \
             WHERE owner_id = ? \
                OR id IN (SELECT workspace_id FROM workspace_members WHERE user_id = ?) \
                OR id IN (SELECT workspace_id FROM user_workspaces WHERE user_id = ?) \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, WorkspaceRow>(&query)
            .bind(user_id)
            .bind(user_id)
            .bind(user_id)
            .fetch_all(store.pool())
            .await?;
        Ok(rows.into_iter().map(Workspace::from).collect())
    }

    /// Delete a workspace together with its cached projects, their tasks and
    /// tags, and its membership rows.
    ///
    /// Returns `false` when no workspace with this id was cached.
    pub async fn delete(store: &LocalStore, id: DbId) -> Result<bool, StoreError> {
        let mut tx = store.pool().begin().await?;

        let projects = "SELECT id FROM projects WHERE workspace_id = ?";
        project_store::delete_contents(&mut *tx, projects, id).await?;
        sqlx::query("DELETE FROM projects WHERE workspace_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for statement in [
            "DELETE FROM workspace_members WHERE workspace_id = ?",
            "DELETE FROM user_workspaces WHERE workspace_id = ?",
        ] {
            sqlx::query(statement).bind(id).execute(&mut *tx).await?;
        }
        let result = sqlx::query("DELETE FROM workspaces WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut tables = vec![
            Table::Workspaces,
            Table::Projects,
            Table::WorkspaceMembers,
            Table::UserWorkspaces,
        ];
        tables.extend_from_slice(project_store::CONTENT_TABLES);
        store.notify(&tables);
        Ok(result.rows_affected() > 0)
    }
}

async fn upsert_in(conn: &mut SqliteConnection, workspace: &Workspace) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO workspaces (id, title, owner_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT (id) DO UPDATE SET \
             title = excluded.title, \
             owner_id = excluded.owner_id, \
             created_at = excluded.created_at, \
             updated_at = excluded.updated_at",
    )
    .bind(workspace.id)
    .bind(workspace.title.as_str())
    .bind(workspace.owner_id)
    .bind(workspace.created_at)
    .bind(workspace.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}
