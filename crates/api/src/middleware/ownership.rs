//! The per-user data-access boundary for single-task operations.
//!
//! A task owned by another user is reported exactly like a task that does
//! not exist, so clients cannot discover other users' ids.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tasktrack_core::error::CoreError;
use tasktrack_core::types::DbId;
use tasktrack_db::models::task::TaskResponse;
use tasktrack_db::TaskStore;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Parse a task id from a path segment.
pub fn parse_task_id(raw: &str) -> Result<DbId, CoreError> {
    raw.parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("Invalid task id: '{raw}'")))
}

/// Load the task `raw_task_id` if it belongs to `user_id`.
///
/// Fails with a validation error for a malformed id and with `NotFound` when
/// the task is missing or owned by someone else.
pub async fn load_owned<S>(store: &S, user_id: DbId, raw_task_id: &str) -> AppResult<TaskResponse>
where
    S: TaskStore + ?Sized,
{
    let task_id = parse_task_id(raw_task_id)?;
    let task = store
        .find_owned_task(user_id, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;
    Ok(task.into())
}

/// The `{id}` path segment, parsed as a task id.
///
/// A segment that is not a UUID rejects with `VALIDATION_ERROR` (400).
#[derive(Debug, Clone, Copy)]
pub struct TaskId(pub DbId);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
        Ok(Self(parse_task_id(&raw_id)?))
    }
}

/// A task that the authenticated user owns, addressed by the `{id}` path
/// segment.
///
/// ```ignore
/// async fn get_task(OwnedTask { task, .. }: OwnedTask) -> Json<TaskResponse> {
///     Json(task)
/// }
/// ```
#[derive(Debug)]
pub struct OwnedTask {
    pub user: AuthUser,
    pub task: TaskResponse,
}

impl FromRequestParts<AppState> for OwnedTask {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;

        let task = load_owned(state.store.as_ref(), user.user_id, &raw_id).await?;
        Ok(OwnedTask { user, task })
    }
}
