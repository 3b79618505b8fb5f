//! Repository for the `tasks` table.
//!
//! Every query that touches an existing task is scoped by both `id` and
//! `owner_id`; there is no unscoped lookup.

use sqlx::{FromRow, PgPool};
use tasktrack_core::types::{new_id, DbId, Timestamp};

use tasktrack_core::error::CoreError;

use crate::error::StoreError;
use crate::models::task::{CreateTask, Task, UpdateTask};

const COLUMNS: &str = "id, owner_id, text, priority, status, created_at, updated_at";

/// Raw row; enum columns are text and get parsed on the way out.
#[derive(FromRow)]
struct TaskRow {
    id: DbId,
    owner_id: DbId,
    text: String,
    priority: String,
    status: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<TaskRow> for Task {
    type Error = CoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: row.id,
            owner_id: row.owner_id,
            text: row.text,
            priority: row.priority.parse()?,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Provides owner-scoped CRUD for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task for `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, StoreError> {
        let query = format!(
            "INSERT INTO tasks (id, owner_id, text, priority, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(new_id())
            .bind(owner_id)
            .bind(&input.text)
            .bind(input.priority.as_str())
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await?;
        Ok(Task::try_from(row)?)
    }

    /// Find a task by id, only if it belongs to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await?
            .map(|row| Task::try_from(row).map_err(StoreError::from))
            .transpose()
    }

    /// List an owner's tasks oldest first, skipping `offset` and returning at
    /// most `limit`.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE owner_id = $1
             ORDER BY created_at, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|row| Task::try_from(row).map_err(StoreError::from))
            .collect()
    }

    /// Partially update a task. Uses `COALESCE` so only provided fields change.
    ///
    /// Returns `true` if a row owned by `owner_id` matched.
    pub async fn update_owned(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET
                text = COALESCE($3, text),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.text)
        .bind(input.priority.map(|p| p.as_str()))
        .bind(input.status.map(|s| s.as_str()))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a task. Returns `true` if a row owned by `owner_id` was removed.
    pub async fn delete_owned(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn row(priority: &str, status: &str) -> TaskRow {
        TaskRow {
            id: new_id(),
            owner_id: new_id(),
            text: "buy milk".into(),
            priority: priority.into(),
            status: status.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_row_maps_to_task() {
        let task = Task::try_from(row("high", "in-progress")).unwrap();
        assert_eq!(task.priority, tasktrack_core::task::Priority::High);
        assert_eq!(task.status, tasktrack_core::task::Status::InProgress);
    }

    #[test]
    fn unknown_enum_text_is_a_corrupt_record() {
        let err = Task::try_from(row("urgent", "todo")).map_err(StoreError::from);
        assert_matches!(err, Err(StoreError::Corrupt(msg)) if msg.contains("urgent"));

        let err = Task::try_from(row("low", "blocked")).map_err(StoreError::from);
        assert_matches!(err, Err(StoreError::Corrupt(msg)) if msg.contains("blocked"));
    }
}
