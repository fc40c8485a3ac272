use async_trait::async_trait;
use taskhub_core::models::{Workspace, WorkspaceInput};
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// `GET /workspaces`: workspaces visible to the current user.
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, RemoteError>;
    async fn get_workspace(&self, id: DbId) -> Result<Workspace, RemoteError>;
    async fn create_workspace(&self, input: &WorkspaceInput) -> Result<Workspace, RemoteError>;
    async fn update_workspace(&self, id: DbId, input: &WorkspaceInput) -> Result<Workspace, RemoteError>;
    /// Returns the deleted workspace.
    async fn delete_workspace(&self, id: DbId) -> Result<Workspace, RemoteError>;
}

#[async_trait]
impl WorkspaceApi for ApiClient {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, RemoteError> {
        self.get("/workspaces").await
    }

    async fn get_workspace(&self, id: DbId) -> Result<Workspace, RemoteError> {
        self.get(&format!("/workspaces/{id}")).await
    }

    async fn create_workspace(&self, input: &WorkspaceInput) -> Result<Workspace, RemoteError> {
        self.post("/workspaces", input).await
    }

    async fn update_workspace(&self, id: DbId, input: &WorkspaceInput) -> Result<Workspace, RemoteError> {
        self.put(&format!("/workspaces/{id}"), input).await
    }

    async fn delete_workspace(&self, id: DbId) -> Result<Workspace, RemoteError> {
        self.delete(&format!("/workspaces/{id}")).await
    }
}
