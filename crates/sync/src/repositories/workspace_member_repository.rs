use std::sync::Arc;

use taskhub_core::error::SyncError;
use taskhub_core::models::{Member, MemberDetails, MemberInput, MemberRoleInput, WorkspaceMember};
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::WorkspaceMemberStore;
use taskhub_db::{LocalStore, Table};
use taskhub_remote::WorkspaceMemberApi;
use validator::Validate;

use super::log_mirror_failure;
use crate::resource_stream::{refresh_then_watch, ResourceStream};

/// Workspace membership with each member's user and role.
#[derive(Clone)]
pub struct WorkspaceMemberRepository {
    store: LocalStore,
    api: Arc<dyn WorkspaceMemberApi>,
}

impl WorkspaceMemberRepository {
    pub fn new(store: LocalStore, api: Arc<dyn WorkspaceMemberApi>) -> Self {
        Self { store, api }
    }

    /// Members of a workspace. Re-emits when membership, users, or roles
    /// change.
    pub fn get_members_by_workspace_id(&self, workspace_id: DbId) -> ResourceStream<Vec<Member>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let members = api.list_members(workspace_id).await?;
                WorkspaceMemberStore::replace_for_workspace(&store, workspace_id, &members).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "workspace members",
                &[Table::WorkspaceMembers, Table::Users, Table::MemberRoles],
                refresh,
                move |store| async move { WorkspaceMemberStore::list_members(&store, workspace_id).await },
                move |rows| {
                    Resource::from_collection(rows, || {
                        format!("No member found for workspace with ID: {workspace_id}")
                    })
                },
            )
            .await;
        })
    }

    pub async fn add_member(&self, workspace_id: DbId, input: &MemberInput) -> Result<MemberDetails, SyncError> {
        input.validate()?;
        let details = self.api.add_member(workspace_id, input).await?;
        log_mirror_failure(
            WorkspaceMemberStore::upsert_details(&self.store, &details).await,
            "workspace_member",
            details.user_id,
        );
        tracing::info!(workspace_id, user_id = details.user_id, role = %details.member_role.role, "Member added");
        Ok(details)
    }

    pub async fn update_member_role(
        &self,
        workspace_id: DbId,
        user_id: DbId,
        input: &MemberRoleInput,
    ) -> Result<MemberDetails, SyncError> {
        let details = self.api.update_member_role(workspace_id, user_id, input).await?;
        log_mirror_failure(
            WorkspaceMemberStore::upsert_details(&self.store, &details).await,
            "workspace_member",
            user_id,
        );
        Ok(details)
    }

    pub async fn remove_member(&self, workspace_id: DbId, user_id: DbId) -> Result<WorkspaceMember, SyncError> {
        let membership = self.api.remove_member(workspace_id, user_id).await?;
        log_mirror_failure(
            WorkspaceMemberStore::delete(&self.store, workspace_id, user_id).await,
            "workspace_member",
            user_id,
        );
        tracing::info!(workspace_id, user_id, "Member removed");
        Ok(membership)
    }
}
