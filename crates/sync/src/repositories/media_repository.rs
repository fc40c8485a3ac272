use std::sync::Arc;

use taskhub_core::error::SyncError;
use taskhub_core::models::Media;
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::MediaStore;
use taskhub_db::{LocalStore, Table};
use taskhub_remote::MediaApi;

use super::log_mirror_failure;
use crate::resource_stream::{refresh_then_watch, ResourceStream};

/// Media attached to tasks. Uploading is handled elsewhere.
#[derive(Clone)]
pub struct MediaRepository {
    store: LocalStore,
    api: Arc<dyn MediaApi>,
}

impl MediaRepository {
    pub fn new(store: LocalStore, api: Arc<dyn MediaApi>) -> Self {
        Self { store, api }
    }

    pub fn get_media_by_task_id(&self, task_id: DbId) -> ResourceStream<Vec<Media>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let media = api.list_media(task_id).await?;
                MediaStore::replace_for_task(&store, task_id, &media).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "media",
                &[Table::Media, Table::TaskMedia],
                refresh,
                move |store| async move { MediaStore::list_by_task(&store, task_id).await },
                move |rows| {
                    Resource::from_collection(rows, || format!("No media found for task with ID: {task_id}"))
                },
            )
            .await;
        })
    }

    /// Delete a media item and detach it from every cached task.
    pub async fn delete_media(&self, id: DbId) -> Result<Media, SyncError> {
        let media = self.api.delete_media(id).await?;
        log_mirror_failure(MediaStore::delete(&self.store, id).await, "media", id);
        Ok(media)
    }
}
