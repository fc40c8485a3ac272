use async_trait::async_trait;
use taskhub_core::models::{Project, ProjectInput};
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list_projects(&self, workspace_id: DbId) -> Result<Vec<Project>, RemoteError>;
    async fn get_project(&self, id: DbId) -> Result<Project, RemoteError>;
    async fn create_project(&self, workspace_id: DbId, input: &ProjectInput) -> Result<Project, RemoteError>;
    async fn update_project(&self, id: DbId, input: &ProjectInput) -> Result<Project, RemoteError>;
    async fn delete_project(&self, id: DbId) -> Result<Project, RemoteError>;
}

#[async_trait]
impl ProjectApi for ApiClient {
    async fn list_projects(&self, workspace_id: DbId) -> Result<Vec<Project>, RemoteError> {
        self.get(&format!("/projects/w/{workspace_id}")).await
    }

    async fn get_project(&self, id: DbId) -> Result<Project, RemoteError> {
        self.get(&format!("/projects/{id}")).await
    }

    async fn create_project(&self, workspace_id: DbId, input: &ProjectInput) -> Result<Project, RemoteError> {
        self.post(&format!("/projects/w/{workspace_id}"), input).await
    }

    async fn update_project(&self, id: DbId, input: &ProjectInput) -> Result<Project, RemoteError> {
        self.put(&format!("/projects/{id}"), input).await
    }

    async fn delete_project(&self, id: DbId) -> Result<Project, RemoteError> {
        self.delete(&format!("/projects/{id}")).await
    }
}
