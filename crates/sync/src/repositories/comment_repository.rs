use std::sync::Arc;

use taskhub_core::error::SyncError;
use taskhub_core::models::{Comment, CommentInput};
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::CommentStore;
use taskhub_db::{LocalStore, Table};
use taskhub_remote::CommentApi;
use validator::Validate;

use super::log_mirror_failure;
use crate::resource_stream::{refresh_then_watch, ResourceStream};

#[derive(Clone)]
pub struct CommentRepository {
    store: LocalStore,
    api: Arc<dyn CommentApi>,
}

impl CommentRepository {
    pub fn new(store: LocalStore, api: Arc<dyn CommentApi>) -> Self {
        Self { store, api }
    }

    /// Comments on a task in posting order.
    pub fn get_comments_by_task_id(&self, task_id: DbId) -> ResourceStream<Vec<Comment>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let comments = api.list_comments(task_id).await?;
                CommentStore::upsert_many(&store, &comments).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "comments",
                &[Table::Comments],
                refresh,
                move |store| async move { CommentStore::list_by_task(&store, task_id).await },
                move |rows| {
                    Resource::from_collection(rows, || {
                        format!("No comment found for task with ID: {task_id}")
                    })
                },
            )
            .await;
        })
    }

    pub async fn create_comment(&self, task_id: DbId, input: &CommentInput) -> Result<Comment, SyncError> {
        input.validate()?;
        let comment = self.api.create_comment(task_id, input).await?;
        log_mirror_failure(CommentStore::upsert(&self.store, &comment).await, "comment", comment.id);
        Ok(comment)
    }

    pub async fn update_comment(&self, id: DbId, input: &CommentInput) -> Result<Comment, SyncError> {
        input.validate()?;
        let comment = self.api.update_comment(id, input).await?;
        log_mirror_failure(CommentStore::upsert(&self.store, &comment).await, "comment", comment.id);
        Ok(comment)
    }

    pub async fn delete_comment(&self, id: DbId) -> Result<Comment, SyncError> {
        let comment = self.api.delete_comment(id).await?;
        log_mirror_failure(CommentStore::delete(&self.store, id).await, "comment", id);
        Ok(comment)
    }
}
