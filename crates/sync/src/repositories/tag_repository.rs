use std::sync::Arc;

use taskhub_core::error::SyncError;
use taskhub_core::models::{Tag, TagInput, TaskTag};
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::TagStore;
use taskhub_db::{LocalStore, Table};
use taskhub_remote::TagApi;
use validator::Validate;

use super::log_mirror_failure;
use crate::resource_stream::{refresh_then_watch, ResourceStream};

/// Project tags and their attachment to tasks.
#[derive(Clone)]
pub struct TagRepository {
    store: LocalStore,
    api: Arc<dyn TagApi>,
}

impl TagRepository {
    pub fn new(store: LocalStore, api: Arc<dyn TagApi>) -> Self {
        Self { store, api }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn get_tags_by_project_id(&self, project_id: DbId) -> ResourceStream<Vec<Tag>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let tags = api.list_project_tags(project_id).await?;
                TagStore::upsert_many(&store, &tags).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "project tags",
                &[Table::Tags],
                refresh,
                move |store| async move { TagStore::list_by_project(&store, project_id).await },
                move |rows| {
                    Resource::from_collection(rows, || {
                        format!("No tag found for project with ID: {project_id}")
                    })
                },
            )
            .await;
        })
    }

    /// Tags attached to a task. Re-emits when tags or attachments change.
    pub fn get_tags_by_task_id(&self, task_id: DbId) -> ResourceStream<Vec<Tag>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let tags = api.list_task_tags(task_id).await?;
                TagStore::replace_for_task(&store, task_id, &tags).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "task tags",
                &[Table::Tags, Table::TaskTags],
                refresh,
                move |store| async move { TagStore::list_by_task(&store, task_id).await },
                move |rows| {
                    Resource::from_collection(rows, || format!("No tag found for task with ID: {task_id}"))
                },
            )
            .await;
        })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_tag(&self, project_id: DbId, input: &TagInput) -> Result<Tag, SyncError> {
        input.validate()?;
        let tag = self.api.create_tag(project_id, input).await?;
        log_mirror_failure(TagStore::upsert(&self.store, &tag).await, "tag", tag.id);
        tracing::info!(tag_id = tag.id, project_id, "Tag created");
        Ok(tag)
    }

    pub async fn update_tag(&self, id: DbId, input: &TagInput) -> Result<Tag, SyncError> {
        input.validate()?;
        let tag = self.api.update_tag(id, input).await?;
        log_mirror_failure(TagStore::upsert(&self.store, &tag).await, "tag", tag.id);
        Ok(tag)
    }

    /// Delete a tag and detach it from every cached task.
    pub async fn delete_tag(&self, id: DbId) -> Result<Tag, SyncError> {
        let tag = self.api.delete_tag(id).await?;
        log_mirror_failure(TagStore::delete(&self.store, id).await, "tag", id);
        Ok(tag)
    }

    pub async fn add_tag_to_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, SyncError> {
        let link = self.api.add_tag_to_task(tag_id, task_id).await?;
        log_mirror_failure(TagStore::attach(&self.store, &link).await, "task_tag", task_id);
        Ok(link)
    }

    pub async fn remove_tag_from_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, SyncError> {
        let link = self.api.remove_tag_from_task(tag_id, task_id).await?;
        log_mirror_failure(
            TagStore::detach(&self.store, task_id, tag_id).await,
            "task_tag",
            task_id,
        );
        Ok(link)
    }
}
