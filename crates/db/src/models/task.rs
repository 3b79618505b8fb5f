//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use tasktrack_core::task::{Priority, Status};
use tasktrack_core::types::{DbId, Timestamp};
use validator::Validate;

/// Upper bound on task text, in characters.
pub const MAX_TASK_TEXT_LEN: u64 = 10_000;

/// A stored task, including its owner.
///
/// Not serializable; clients only ever see [`TaskResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: DbId,
    pub owner_id: DbId,
    pub text: String,
    pub priority: Priority,
    pub status: Status,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Client-facing task projection. The owner id never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: DbId,
    pub text: String,
    pub priority: Priority,
    pub status: Status,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            text: task.text,
            priority: task.priority,
            status: task.status,
        }
    }
}

/// DTO for creating a task. The owner comes from the session, never the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(max = MAX_TASK_TEXT_LEN))]
    pub text: String,
    pub priority: Priority,
    pub status: Status,
}

/// DTO for a partial task update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(max = MAX_TASK_TEXT_LEN))]
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl UpdateTask {
    /// Apply the provided fields onto `task`, leaving the rest untouched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text.clone_from(text);
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}
