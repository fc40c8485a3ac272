use std::sync::Arc;

use taskhub_core::error::SyncError;
use taskhub_core::models::{Task, TaskAssigned, TaskInput, User};
use taskhub_core::resource::Resource;
use taskhub_core::types::DbId;
use taskhub_db::stores::TaskStore;
use taskhub_db::{LocalStore, Table};
use taskhub_remote::TaskApi;
use validator::Validate;

use super::log_mirror_failure;
use crate::resource_stream::{refresh_then_watch, ResourceStream};

/// Tasks of a project and their assigned users.
#[derive(Clone)]
pub struct TaskRepository {
    store: LocalStore,
    api: Arc<dyn TaskApi>,
}

impl TaskRepository {
    pub fn new(store: LocalStore, api: Arc<dyn TaskApi>) -> Self {
        Self { store, api }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn get_tasks_by_project_id(&self, project_id: DbId) -> ResourceStream<Vec<Task>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let tasks = api.list_tasks(project_id).await?;
                TaskStore::upsert_many(&store, &tasks).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "tasks",
                &[Table::Tasks],
                refresh,
                move |store| async move { TaskStore::list_by_project(&store, project_id).await },
                move |rows| {
                    Resource::from_collection(rows, || {
                        format!("No task found for project with ID: {project_id}")
                    })
                },
            )
            .await;
        })
    }

    pub fn get_task_by_id(&self, id: DbId) -> ResourceStream<Task> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let task = api.get_task(id).await?;
                TaskStore::upsert(&store, &task).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "task",
                &[Table::Tasks],
                refresh,
                move |store| async move { TaskStore::find_by_id(&store, id).await },
                move |row| Resource::from_option(row, || format!("No task found with ID: {id}")),
            )
            .await;
        })
    }

    /// Users assigned to a task. Re-emits when users or assignments change.
    pub fn get_assigned_users(&self, task_id: DbId) -> ResourceStream<Vec<User>> {
        let store = self.store.clone();
        let api = Arc::clone(&self.api);

        ResourceStream::spawn(move |out| async move {
            let refresh = async {
                let users = api.list_assigned_users(task_id).await?;
                TaskStore::replace_assigned(&store, task_id, &users).await?;
                Ok::<_, SyncError>(())
            };
            refresh_then_watch(
                &out,
                &store,
                "assigned users",
                &[Table::Users, Table::TaskAssigned],
                refresh,
                move |store| async move { TaskStore::list_assigned_users(&store, task_id).await },
                move |rows| {
                    Resource::from_collection(rows, || {
                        format!("No user found for task with ID: {task_id}")
                    })
                },
            )
            .await;
        })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_task(&self, project_id: DbId, input: &TaskInput) -> Result<Task, SyncError> {
        input.validate()?;
        let task = self.api.create_task(project_id, input).await?;
        log_mirror_failure(TaskStore::upsert(&self.store, &task).await, "task", task.id);
        tracing::info!(task_id = task.id, project_id, "Task created");
        Ok(task)
    }

    pub async fn update_task(&self, id: DbId, input: &TaskInput) -> Result<Task, SyncError> {
        input.validate()?;
        let task = self.api.update_task(id, input).await?;
        log_mirror_failure(TaskStore::upsert(&self.store, &task).await, "task", task.id);
        Ok(task)
    }

    /// Delete a task; its comments, bookmarks, and tag/media/assignee links
    /// are removed from the cache with it.
    pub async fn delete_task(&self, id: DbId) -> Result<Task, SyncError> {
        let task = self.api.delete_task(id).await?;
        log_mirror_failure(TaskStore::delete(&self.store, id).await, "task", id);
        tracing::info!(task_id = id, "Task deleted");
        Ok(task)
    }

    pub async fn assign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, SyncError> {
        let assignment = self.api.assign_user(task_id, user_id).await?;
        log_mirror_failure(TaskStore::assign(&self.store, &assignment).await, "task_assigned", task_id);
        Ok(assignment)
    }

    pub async fn unassign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, SyncError> {
        let assignment = self.api.unassign_user(task_id, user_id).await?;
        log_mirror_failure(
            TaskStore::unassign(&self.store, task_id, user_id).await,
            "task_assigned",
            task_id,
        );
        Ok(assignment)
    }
}
