//! Store for the `tasks` and `task_assigned` tables.

use taskhub_core::models::{Task, TaskAssigned, User};
use taskhub_core::types::DbId;

use crate::changes::Table;
use crate::error::StoreError;
use crate::models::task::TaskRow;
use crate::models::user::UserRow;
use crate::store::LocalStore;
use crate::stores::user_store::UserStore;

/// Column list for `tasks` queries.
const COLUMNS: &str = "\
    id, title, description, deadline, timer, status, project_id, \
    breadcrumb, created_at, updated_at";

/// Same columns qualified with the `t` alias, for joins.
const JOINED_COLUMNS: &str = "\
    t.id, t.title, t.description, t.deadline, t.timer, t.status, t.project_id, \
    t.breadcrumb, t.created_at, t.updated_at";

/// Cache operations for tasks and their assigned users.
pub struct TaskStore;

impl TaskStore {
    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub async fn upsert(store: &LocalStore, task: &Task) -> Result<(), StoreError> {
        Self::upsert_many(store, std::slice::from_ref(task)).await
    }

    /// Insert or replace every task in one transaction.
    pub async fn upsert_many(store: &LocalStore, tasks: &[Task]) -> Result<(), StoreError> {
        if tasks.is_empty() {
            return Ok(());
        }

        let mut tx = store.pool().begin().await?;
        for task in tasks {
            sqlx::query(
                "INSERT INTO tasks (id, title, description, deadline, timer, status, \
                     project_id, breadcrumb, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                     title = excluded.title, \
                     description = excluded.description, \
                     deadline = excluded.deadline, \
                     timer = excluded.timer, \
                     status = excluded.status, \
                     project_id = excluded.project_id, \
                     breadcrumb = excluded.breadcrumb, \
                     created_at = excluded.created_at, \
                     updated_at = excluded.updated_at",
            )
            .bind(task.id)
            .bind(task.title.as_str())
            .bind(task.description.as_deref())
            .bind(task.deadline)
            .bind(task.timer)
            .bind(task.status.as_str())
            .bind(task.project_id)
            .bind(task.breadcrumb.as_str())
            .bind(task.created_at)
            .bind(task.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        store.notify(&[Table::Tasks]);
        Ok(())
    }

    pub async fn find_by_id(store: &LocalStore, id: DbId) -> Result<Option<Task>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?");
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(store.pool())
            .await?;
        Ok(row.map(Task::from))
    }

    pub async fn list_by_project(
        store: &LocalStore,
        project_id: DbId,
    ) -> Result<Vec<Task>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = ? ORDER BY id");
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(project_id)
            .fetch_all(store.pool())
            .await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    /// Cached tasks bookmarked by `user_id`, most recently bookmarked first.
    ///
    /// Bookmarks whose task is not cached are skipped.
    pub async fn list_bookmarked(store: &LocalStore, user_id: DbId) -> Result<Vec<Task>, StoreError> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM tasks t \
             JOIN bookmarks b ON b.task_id = t.id \
             WHERE b.user_id = ? \
             ORDER BY b.created_at DESC, t.id"
        );
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(user_id)
            .fetch_all(store.pool())
            .await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    /// Delete a task together with its comments and every join row that
    /// references it.
    ///
    /// Returns `false` when no task with this id was cached.
    pub async fn delete(store: &LocalStore, id: DbId) -> Result<bool, StoreError> {
        let mut tx = store.pool().begin().await?;

        for statement in [
            "DELETE FROM task_tags WHERE task_id = ?",
            "DELETE FROM task_media WHERE task_id = ?",
            "DELETE FROM task_assigned WHERE task_id = ?",
            "DELETE FROM bookmarks WHERE task_id = ?",
            "DELETE FROM comments WHERE task_id = ?",
        ] {
            sqlx::query(statement).bind(id).execute(&mut *tx).await?;
        }
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        store.notify(&[
            Table::Tasks,
            Table::TaskTags,
            Table::TaskMedia,
            Table::TaskAssigned,
            Table::Bookmarks,
            Table::Comments,
        ]);
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Assignments
    // -----------------------------------------------------------------------

    /// Record one assignment.
    pub async fn assign(store: &LocalStore, assignment: &TaskAssigned) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO task_assigned (task_id, user_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (task_id, user_id) DO UPDATE SET created_at = excluded.created_at",
        )
        .bind(assignment.task_id)
        .bind(assignment.user_id)
        .bind(assignment.created_at)
        .execute(store.pool())
        .await?;

        store.notify(&[Table::TaskAssigned]);
        Ok(())
    }

    /// Remove one assignment. Absent rows are a no-op.
    pub async fn unassign(store: &LocalStore, task_id: DbId, user_id: DbId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM task_assigned WHERE task_id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(store.pool())
            .await?;

        store.notify(&[Table::TaskAssigned]);
        Ok(())
    }

    /// Replace the cached assignees of a task with the server's list.
    ///
    /// Users are upserted; assignment rows not in `users` are removed.
    pub async fn replace_assigned(
        store: &LocalStore,
        task_id: DbId,
        users: &[User],
    ) -> Result<(), StoreError> {
        let mut tx = store.pool().begin().await?;

        sqlx::query("DELETE FROM task_assigned WHERE task_id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;
        for user in users {
            UserStore::upsert_in(&mut *tx, user).await?;
            sqlx::query(
                "INSERT INTO task_assigned (task_id, user_id) VALUES (?, ?) \
                 ON CONFLICT (task_id, user_id) DO NOTHING",
            )
            .bind(task_id)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        store.notify(&[Table::Users, Table::TaskAssigned]);
        Ok(())
    }

    /// Cached users assigned to a task.
    pub async fn list_assigned_users(
        store: &LocalStore,
        task_id: DbId,
    ) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.fullname, u.username, u.email, u.avatar, u.created_at, u.updated_at \
             FROM users u \
             JOIN task_assigned a ON a.user_id = u.id \
             WHERE a.task_id = ? \
             ORDER BY u.id",
        )
        .bind(task_id)
        .fetch_all(store.pool())
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
