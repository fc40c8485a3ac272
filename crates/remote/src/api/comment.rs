use async_trait::async_trait;
use taskhub_core::models::{Comment, CommentInput};
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

#[async_trait]
pub trait CommentApi: Send + Sync {
    async fn list_comments(&self, task_id: DbId) -> Result<Vec<Comment>, RemoteError>;
    async fn create_comment(&self, task_id: DbId, input: &CommentInput) -> Result<Comment, RemoteError>;
    async fn update_comment(&self, id: DbId, input: &CommentInput) -> Result<Comment, RemoteError>;
    async fn delete_comment(&self, id: DbId) -> Result<Comment, RemoteError>;
}

#[async_trait]
impl CommentApi for ApiClient {
    async fn list_comments(&self, task_id: DbId) -> Result<Vec<Comment>, RemoteError> {
        self.get(&format!("/comments/t/{task_id}")).await
    }

    async fn create_comment(&self, task_id: DbId, input: &CommentInput) -> Result<Comment, RemoteError> {
        self.post(&format!("/comments/t/{task_id}"), input).await
    }

    async fn update_comment(&self, id: DbId, input: &CommentInput) -> Result<Comment, RemoteError> {
        self.put(&format!("/comments/{id}"), input).await
    }

    async fn delete_comment(&self, id: DbId) -> Result<Comment, RemoteError> {
        self.delete(&format!("/comments/{id}")).await
    }
}
