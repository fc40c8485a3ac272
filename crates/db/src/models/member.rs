use sqlx::FromRow;
use taskhub_core::models::{Member, MemberRole, User};
use taskhub_core::roles::Role;
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `member_roles` table.
#[derive(Debug, Clone, FromRow)]
pub struct MemberRoleRow {
    pub id: DbId,
    pub role: String,
    pub workspace_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
}

impl From<MemberRoleRow> for MemberRole {
    fn from(row: MemberRoleRow) -> Self {
        Self {
            id: row.id,
            role: Role::from_str_lossy(&row.role),
            workspace_id: row.workspace_id,
            project_id: row.project_id,
            task_id: row.task_id,
        }
    }
}

/// A `workspace_members` row joined with its user and member role.
///
/// Columns are aliased because `users` and `member_roles` both have `id`.
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub user_id: DbId,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub user_created_at: Timestamp,
    pub user_updated_at: Timestamp,
    pub member_role_id: DbId,
    pub role: String,
    pub role_workspace_id: Option<DbId>,
    pub role_project_id: Option<DbId>,
    pub role_task_id: Option<DbId>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            user: User {
                id: row.user_id,
                fullname: row.fullname,
                username: row.username,
                email: row.email,
                avatar: row.avatar,
                created_at: row.user_created_at,
                updated_at: row.user_updated_at,
            },
            member_role: MemberRole {
                id: row.member_role_id,
                role: Role::from_str_lossy(&row.role),
                workspace_id: row.role_workspace_id,
                project_id: row.role_project_id,
                task_id: row.role_task_id,
            },
        }
    }
}
