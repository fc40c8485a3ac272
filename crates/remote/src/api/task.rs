use async_trait::async_trait;
use taskhub_core::models::{Task, TaskAssigned, TaskInput, User};
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, project_id: DbId) -> Result<Vec<Task>, RemoteError>;
    async fn get_task(&self, id: DbId) -> Result<Task, RemoteError>;
    async fn create_task(&self, project_id: DbId, input: &TaskInput) -> Result<Task, RemoteError>;
    async fn update_task(&self, id: DbId, input: &TaskInput) -> Result<Task, RemoteError>;
    /// Returns the deleted task.
    async fn delete_task(&self, id: DbId) -> Result<Task, RemoteError>;

    // ---- assignments ----

    async fn list_assigned_users(&self, task_id: DbId) -> Result<Vec<User>, RemoteError>;
    async fn assign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, RemoteError>;
    async fn unassign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, RemoteError>;
}

#[async_trait]
impl TaskApi for ApiClient {
    async fn list_tasks(&self, project_id: DbId) -> Result<Vec<Task>, RemoteError> {
        self.get(&format!("/tasks/p/{project_id}")).await
    }

    async fn get_task(&self, id: DbId) -> Result<Task, RemoteError> {
        self.get(&format!("/tasks/{id}")).await
    }

    async fn create_task(&self, project_id: DbId, input: &TaskInput) -> Result<Task, RemoteError> {
        self.post(&format!("/tasks/p/{project_id}"), input).await
    }

    async fn update_task(&self, id: DbId, input: &TaskInput) -> Result<Task, RemoteError> {
        self.put(&format!("/tasks/{id}"), input).await
    }

    async fn delete_task(&self, id: DbId) -> Result<Task, RemoteError> {
        self.delete(&format!("/tasks/{id}")).await
    }

    async fn list_assigned_users(&self, task_id: DbId) -> Result<Vec<User>, RemoteError> {
        self.get(&format!("/tasks/{task_id}/assigned")).await
    }

    async fn assign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, RemoteError> {
        self.post_empty(&format!("/tasks/{task_id}/assigned/{user_id}")).await
    }

    async fn unassign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, RemoteError> {
        self.delete(&format!("/tasks/{task_id}/assigned/{user_id}")).await
    }
}
