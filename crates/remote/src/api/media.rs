use async_trait::async_trait;
use taskhub_core::models::Media;
use taskhub_core::types::DbId;

use crate::client::ApiClient;
use crate::error::RemoteError;

/// Media endpoints. Uploads go through a separate pipeline.
#[async_trait]
pub trait MediaApi: Send + Sync {
    async fn list_media(&self, task_id: DbId) -> Result<Vec<Media>, RemoteError>;
    async fn delete_media(&self, id: DbId) -> Result<Media, RemoteError>;
}

#[async_trait]
impl MediaApi for ApiClient {
    async fn list_media(&self, task_id: DbId) -> Result<Vec<Media>, RemoteError> {
        self.get(&format!("/media/t/{task_id}")).await
    }

    async fn delete_media(&self, id: DbId) -> Result<Media, RemoteError> {
        self.delete(&format!("/media/{id}")).await
    }
}
