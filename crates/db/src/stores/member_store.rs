//! Stores for the `member_roles` and `workspace_members` tables.

use sqlx::SqliteConnection;
use taskhub_core::models::{Member, MemberDetails, MemberRole, WorkspaceMember};
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::member::{MemberRoleRow, MemberRow};
use crate::store::LocalStore;
use crate::stores::user_store::UserStore;

// ---------------------------------------------------------------------------
// Member roles
// ---------------------------------------------------------------------------

/// Cache operations for member roles.
pub struct MemberRoleStore;

impl MemberRoleStore {
    pub async fn upsert(store: &LocalStore, role: &MemberRole) -> Result<(), StoreError> {
        let mut conn = store.pool().acquire().await?;
        upsert_role(&mut *conn, role).await?;
        store.notify(&[Table::MemberRoles]);
        Ok(())
    }

    pub async fn find_by_id(store: &LocalStore, id: DbId) -> Result<Option<MemberRole>, StoreError> {
        let row = sqlx::query_as::<_, MemberRoleRow>(
            "SELECT id, role, workspace_id, project_id, task_id FROM member_roles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(store.pool())
        .await?;
        Ok(row.map(MemberRole::from))
    }
}

async fn upsert_role(conn: &mut SqliteConnection, role: &MemberRole) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO member_roles (id, role, workspace_id, project_id, task_id) \
         VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT (id) DO UPDATE SET \
             role = excluded.role, \
             workspace_id = excluded.workspace_id, \
             project_id = excluded.project_id, \
             task_id = excluded.task_id",
    )
    .bind(role.id)
    .bind(role.role.as_str())
    .bind(role.workspace_id)
    .bind(role.project_id)
    .bind(role.task_id)
    .execute(conn)
    .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Workspace members
// ---------------------------------------------------------------------------

/// Cache operations for workspace membership.
pub struct WorkspaceMemberStore;

impl WorkspaceMemberStore {
    /// Record one membership together with its user and role.
    pub async fn upsert_details(store: &LocalStore, details: &MemberDetails) -> Result<(), StoreError> {
        let mut tx = store.pool().begin().await?;
        upsert_details_in(&mut *tx, details).await?;
        tx.commit().await?;

        store.notify(&[Table::Users, Table::MemberRoles, Table::WorkspaceMembers]);
        Ok(())
    }

    /// Replace the cached members of a workspace with the server's list.
    pub async fn replace_for_workspace(
        store: &LocalStore,
        workspace_id: DbId,
        members: &[MemberDetails],
    ) -> Result<(), StoreError> {
        let mut tx = store.pool().begin().await?;

        sqlx::query("DELETE FROM workspace_members WHERE workspace_id = ?")
            .bind(workspace_id)
            .execute(&mut *tx)
            .await?;
        for details in members {
            upsert_details_in(&mut *tx, details).await?;
        }

        tx.commit().await?;

        store.notify(&[Table::Users, Table::MemberRoles, Table::WorkspaceMembers]);
        Ok(())
    }

    /// Cached members of a workspace with their user and role resolved.
    ///
    /// Membership rows whose user or role is not cached are skipped.
    pub async fn list_members(store: &LocalStore, workspace_id: DbId) -> Result<Vec<Member>, StoreError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            "SELECT \
                 u.id AS user_id, u.fullname, u.username, u.email, u.avatar, \
                 u.created_at AS user_created_at, u.updated_at AS user_updated_at, \
                 r.id AS member_role_id, r.role, \
                 r.workspace_id AS role_workspace_id, \
                 r.project_id AS role_project_id, \
                 r.task_id AS role_task_id \
             FROM workspace_members wm \
             JOIN users u ON u.id = wm.user_id \
             JOIN member_roles r ON r.id = wm.member_role_id \
             WHERE wm.workspace_id = ? \
             ORDER BY u.id",
        )
        .bind(workspace_id)
        .fetch_all(store.pool())
        .await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    /// Absent rows are a no-op. Returns whether a row was removed.
    pub async fn delete(store: &LocalStore, workspace_id: DbId, user_id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM workspace_members WHERE workspace_id = ? AND user_id = ?")
            .bind(workspace_id)
            .bind(user_id)
            .execute(store.pool())
            .await?;

        store.notify(&[Table::WorkspaceMembers]);
        Ok(result.rows_affected() > 0)
    }
}

async fn upsert_membership(
    conn: &mut SqliteConnection,
    membership: &WorkspaceMember,
) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO workspace_members (workspace_id, user_id, member_role_id) VALUES (?, ?, ?) \
         ON CONFLICT (workspace_id, user_id) DO UPDATE SET member_role_id = excluded.member_role_id",
    )
    .bind(membership.workspace_id)
    .bind(membership.user_id)
    .bind(membership.member_role_id)
    .execute(conn)
    .await?;
    Ok(())
}

async fn upsert_details_in(conn: &mut SqliteConnection, details: &MemberDetails) -> Result<(), StoreError> {
    UserStore::upsert_in(&mut *conn, &details.user).await?;
    upsert_role(&mut *conn, &details.member_role).await?;
    upsert_membership(&mut *conn, &details.membership()).await
}
