//! Member roles and workspace membership.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::roles::{Role, RoleScope};
use crate::types::DbId;

/// A role granted at exactly one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRole {
    pub id: DbId,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub workspace_id: Option<DbId>,
    #[serde(default)]
    pub project_id: Option<DbId>,
    #[serde(default)]
    pub task_id: Option<DbId>,
}

impl MemberRole {
    /// The scope this role applies to, if the server provided one.
    pub fn scope(&self) -> Option<RoleScope> {
        RoleScope::from_ids(self.workspace_id, self.project_id, self.task_id)
    }
}

/// A row of the `workspace_members` join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMember {
    pub workspace_id: DbId,
    pub user_id: DbId,
    pub member_role_id: DbId,
}

/// Membership row as listed by `GET /workspaces/{id}/members`, with the user
/// and role embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    pub workspace_id: DbId,
    pub user_id: DbId,
    pub member_role_id: DbId,
    pub user: super::User,
    pub member_role: MemberRole,
}

impl MemberDetails {
    pub fn membership(&self) -> WorkspaceMember {
        WorkspaceMember {
            workspace_id: self.workspace_id,
            user_id: self.user_id,
            member_role_id: self.member_role_id,
        }
    }
}

/// A workspace member resolved from the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user: super::User,
    pub member_role: MemberRole,
}

/// Body for `POST /workspaces/{id}/members`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    #[validate(range(min = 1, message = "userId must be positive"))]
    pub user_id: DbId,
    pub role: Role,
}

/// Body for `PUT /workspaces/{id}/members/{userId}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRoleInput {
    pub role: Role,
}
