use std::sync::Arc;

use taskhub_core::auth::AuthContext;
use taskhub_core::error::SyncError;
use taskhub_core::models::{Workspace, WorkspaceInput};
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::WorkspaceStore;
use taskhub_db::{LocalStore, Table};
use taskhub_remote::WorkspaceApi;
use validator::Validate;

use super::log_mirror_failure;
use crate::resource_stream::{for_each_session, refresh_then_watch, ResourceStream};

/// Workspaces visible to the signed-in user.
#[derive(Clone)]
pub struct WorkspaceRepository {
    store: LocalStore,
    api: Arc<dyn WorkspaceApi>,
    auth: AuthContext,
}

impl WorkspaceRepository {
    pub fn new(store: LocalStore, api: Arc<dyn WorkspaceApi>, auth: AuthContext) -> Self {
        Self { store, api, auth }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Workspaces of the signed-in user, restarted whenever the user changes.
    pub fn get_workspaces(&self) -> ResourceStream<Vec<Workspace>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);
        let auth = self.auth.clone();

        ResourceStream::spawn(move |out| async move {
            let session_out = out.clone();
            for_each_session(&auth, &out, move |user_id| {
                let store = store.clone();
                let api = Arc::clone(&api);
                let out = session_out.clone();

                async move {
                    let refresh = async {
                        let workspaces = api.list_workspaces().await?;
                        WorkspaceStore::replace_for_user(&store, user_id, &workspaces).await?;
                        Ok::<_, SyncError>(())
                    };
                    refresh_then_watch(
                        &out,
                        &store,
                        "workspaces",
                        &[Table::Workspaces, Table::WorkspaceMembers, Table::UserWorkspaces],
                        refresh,
                        move |store| async move { WorkspaceStore::list_for_user(&store, user_id).await },
                        move |rows| {
                            Resource::from_collection(rows, || {
                                format!("No workspace found for user with ID: {user_id}")
                            })
                        },
                    )
                    .await;
                }
            })
            .await;
        })
    }

    pub fn get_workspace_by_id(&self, id: DbId) -> ResourceStream<Workspace> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let workspace = api.get_workspace(id).await?;
                WorkspaceStore::upsert(&store, &workspace).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "workspace",
                &[Table::Workspaces],
                refresh,
                move |store| async move { WorkspaceStore::find_by_id(&store, id).await },
                move |row| Resource::from_option(row, || format!("No workspace found with ID: {id}")),
            )
            .await;
        })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_workspace(&self, input: &WorkspaceInput) -> Result<Workspace, SyncError> {
        input.validate()?;
        let workspace = self.api.create_workspace(input).await?;
        log_mirror_failure(
            WorkspaceStore::upsert(&self.store, &workspace).await,
            "workspace",
            workspace.id,
        );
        tracing::info!(workspace_id = workspace.id, "Workspace created");
        Ok(workspace)
    }

    pub async fn update_workspace(&self, id: DbId, input: &WorkspaceInput) -> Result<Workspace, SyncError> {
        input.validate()?;
        let workspace = self.api.update_workspace(id, input).await?;
        log_mirror_failure(
            WorkspaceStore::upsert(&self.store, &workspace).await,
            "workspace",
            workspace.id,
        );
        Ok(workspace)
    }

    /// Delete a workspace; its cached projects, tasks, tags, and membership
    /// rows go with it.
    pub async fn delete_workspace(&self, id: DbId) -> Result<Workspace, SyncError> {
        let workspace = self.api.delete_workspace(id).await?;
        log_mirror_failure(WorkspaceStore::delete(&self.store, id).await, "workspace", id);
        tracing::info!(workspace_id = id, "Workspace deleted");
        Ok(workspace)
    }
}
