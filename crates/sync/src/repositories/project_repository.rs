use std::sync::Arc;

use taskhub_core::error::SyncError;
use taskhub_core::models::{Project, ProjectInput};
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::ProjectStore;
use taskhub_db::{LocalStore, Table};
use taskhub_remote::ProjectApi;
use validator::Validate;

use super::log_mirror_failure;
use crate::resource_stream::{refresh_then_watch, ResourceStream};

#[derive(Clone)]
pub struct ProjectRepository {
    store: LocalStore,
    api: Arc<dyn ProjectApi>,
}

impl ProjectRepository {
    pub fn new(store: LocalStore, api: Arc<dyn ProjectApi>) -> Self {
        Self { store, api }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn get_projects_by_workspace_id(&self, workspace_id: DbId) -> ResourceStream<Vec<Project>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let projects = api.list_projects(workspace_id).await?;
                ProjectStore::upsert_many(&store, &projects).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "projects",
                &[Table::Projects],
                refresh,
                move |store| async move { ProjectStore::list_by_workspace(&store, workspace_id).await },
                move |rows| {
                    Resource::from_collection(rows, || {
                        format!("No project found for workspace with ID: {workspace_id}")
                    })
                },
            )
            .await;
        })
    }

    pub fn get_project_by_id(&self, id: DbId) -> ResourceStream<Project> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let project = api.get_project(id).await?;
                ProjectStore::upsert(&store, &project).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "project",
                &[Table::Projects],
                refresh,
                move |store| async move { ProjectStore::find_by_id(&store, id).await },
                move |row| Resource::from_option(row, || format!("No project found with ID: {id}")),
            )
            .await;
        })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_project(&self, workspace_id: DbId, input: &ProjectInput) -> Result<Project, SyncError> {
        input.validate()?;
        let project = self.api.create_project(workspace_id, input).await?;
        log_mirror_failure(ProjectStore::upsert(&self.store, &project).await, "project", project.id);
        tracing::info!(project_id = project.id, workspace_id, "Project created");
        Ok(project)
    }

    pub async fn update_project(&self, id: DbId, input: &ProjectInput) -> Result<Project, SyncError> {
        input.validate()?;
        let project = self.api.update_project(id, input).await?;
        log_mirror_failure(ProjectStore::upsert(&self.store, &project).await, "project", project.id);
        Ok(project)
    }

    /// Delete a project; its cached tasks and tags go with it.
    pub async fn delete_project(&self, id: DbId) -> Result<Project, SyncError> {
        let project = self.api.delete_project(id).await?;
        log_mirror_failure(ProjectStore::delete(&self.store, id).await, "project", id);
        tracing::info!(project_id = id, "Project deleted");
        Ok(project)
    }
}
