use async_trait::async_trait;
use taskhub_core::models::{Tag, TagInput, TaskTag};
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

#[async_trait]
pub trait TagApi: Send + Sync {
    async fn list_project_tags(&self, project_id: DbId) -> Result<Vec<Tag>, RemoteError>;
    async fn list_task_tags(&self, task_id: DbId) -> Result<Vec<Tag>, RemoteError>;
    async fn create_tag(&self, project_id: DbId, input: &TagInput) -> Result<Tag, RemoteError>;
    async fn update_tag(&self, id: DbId, input: &TagInput) -> Result<Tag, RemoteError>;
    async fn delete_tag(&self, id: DbId) -> Result<Tag, RemoteError>;
    async fn add_tag_to_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, RemoteError>;
    async fn remove_tag_from_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, RemoteError>;
}

#[async_trait]
impl TagApi for ApiClient {
    async fn list_project_tags(&self, project_id: DbId) -> Result<Vec<Tag>, RemoteError> {
        self.get(&format!("/tags/p/{project_id}")).await
    }

    async fn list_task_tags(&self, task_id: DbId) -> Result<Vec<Tag>, RemoteError> {
        self.get(&format!("/tags/t/{task_id}")).await
    }

    async fn create_tag(&self, project_id: DbId, input: &TagInput) -> Result<Tag, RemoteError> {
        self.post(&format!("/tags/p/{project_id}"), input).await
    }

    async fn update_tag(&self, id: DbId, input: &TagInput) -> Result<Tag, RemoteError> {
        self.put(&format!("/tags/{id}"), input).await
    }

    async fn delete_tag(&self, id: DbId) -> Result<Tag, RemoteError> {
        self.delete(&format!("/tags/{id}")).await
    }

    async fn add_tag_to_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, RemoteError> {
        self.post_empty(&format!("/tags/{tag_id}/t/{task_id}")).await
    }

    async fn remove_tag_from_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, RemoteError> {
        self.delete(&format!("/tags/{tag_id}/t/{task_id}")).await
    }
}
