use async_trait::async_trait;
use taskhub_core::models::{MemberDetails, MemberInput, MemberRole, MemberRoleInput, WorkspaceMember};
use taskhub_core::roles::RoleScope;
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

// ---------------------------------------------------------------------------
// Member roles
// ---------------------------------------------------------------------------

#[async_trait]
pub trait MemberRoleApi: Send + Sync {
    /// The current user's role at `scope`.
    async fn get_member_role(&self, scope: RoleScope) -> Result<MemberRole, RemoteError>;
}

#[async_trait]
impl MemberRoleApi for ApiClient {
    async fn get_member_role(&self, scope: RoleScope) -> Result<MemberRole, RemoteError> {
        self.get(&format!("/members/{}/{}", scope.path_segment(), scope.id()))
            .await
    }
}

// ---------------------------------------------------------------------------
// Workspace members
// ---------------------------------------------------------------------------

#[async_trait]
pub trait WorkspaceMemberApi: Send + Sync {
    async fn list_members(&self, workspace_id: DbId) -> Result<Vec<MemberDetails>, RemoteError>;
    async fn add_member(&self, workspace_id: DbId, input: &MemberInput) -> Result<MemberDetails, RemoteError>;
    async fn update_member_role(
        &self,
        workspace_id: DbId,
        user_id: DbId,
        input: &MemberRoleInput,
    ) -> Result<MemberDetails, RemoteError>;
    async fn remove_member(&self, workspace_id: DbId, user_id: DbId) -> Result<WorkspaceMember, RemoteError>;
}

#[async_trait]
impl WorkspaceMemberApi for ApiClient {
    async fn list_members(&self, workspace_id: DbId) -> Result<Vec<MemberDetails>, RemoteError> {
        self.get(&format!("/workspaces/{workspace_id}/members")).await
    }

    async fn add_member(&self, workspace_id: DbId, input: &MemberInput) -> Result<MemberDetails, RemoteError> {
        self.post(&format!("/workspaces/{workspace_id}/members"), input)
            .await
    }

    async fn update_member_role(
        &self,
        workspace_id: DbId,
        user_id: DbId,
        input: &MemberRoleInput,
    ) -> Result<MemberDetails, RemoteError> {
        self.put(&format!("/workspaces/{workspace_id}/members/{user_id}"), input)
            .await
    }

    async fn remove_member(&self, workspace_id: DbId, user_id: DbId) -> Result<WorkspaceMember, RemoteError> {
        self.delete(&format!("/workspaces/{workspace_id}/members/{user_id}"))
            .await
    }
}
