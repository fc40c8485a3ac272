use sqlx::FromRow;
use taskhub_core::models::{Task, TaskStatus};
use taskhub_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<Timestamp>,
    pub timer: Option<i64>,
    pub status: String,
    pub project_id: DbId,
    pub breadcrumb: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            deadline: row.deadline,
            timer: row.timer,
            status: TaskStatus::from_str_lossy(&row.status),
            project_id: row.project_id,
            breadcrumb: row.breadcrumb,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
