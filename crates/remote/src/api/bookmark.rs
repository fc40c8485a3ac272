use async_trait::async_trait;
use taskhub_core::models::Bookmark;
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

/// Bookmark endpoints. The user is implied by the bearer token.
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, RemoteError>;
    /// Fails with a 404 when the task is not bookmarked.
    async fn get_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError>;
    async fn create_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError>;
    async fn delete_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError>;
}

#[async_trait]
impl BookmarkApi for ApiClient {
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, RemoteError> {
        self.get("/bookmarks").await
    }

    async fn get_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError> {
        self.get(&format!("/bookmarks/t/{task_id}")).await
    }

    async fn create_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError> {
        self.post_empty(&format!("/bookmarks/t/{task_id}")).await
    }

    async fn delete_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError> {
        self.delete(&format!("/bookmarks/t/{task_id}")).await
    }
}
