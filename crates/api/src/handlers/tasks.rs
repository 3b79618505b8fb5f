//! Handlers for the `/tasks` resource.
//!
//! Every handler is scoped to the authenticated user. Updates and deletes
//! addressed at a task the caller does not own succeed without effect.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tasktrack_core::pagination::Page;
use tasktrack_db::models::task::{CreateTask, TaskResponse, UpdateTask};
use tasktrack_db::TaskStore;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidatedJson;
use crate::middleware::ownership::{OwnedTask, TaskId};
use crate::middleware::query::ValidatedQuery;
use crate::response::{CreatedResponse, SuccessResponse};
use crate::state::AppState;

/// Query parameters for `GET /tasks`. Kept as raw strings so that anything
/// other than plain digits is reported as a validation error.
#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// POST /tasks
pub async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> AppResult<Json<CreatedResponse>> {
    let task = state.store.create_task(user.user_id, input).await?;

    tracing::info!(task_id = %task.id, user_id = %user.user_id, "Task created");

    Ok(Json(CreatedResponse::new(task.id)))
}

/// GET /tasks?page=&limit=
///
/// Oldest first; see [`Page`] for defaults and bounds.
pub async fn list_tasks(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ListTasksParams>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let page = Page::from_params(params.page.as_deref(), params.limit.as_deref())?;

    let tasks = state
        .store
        .list_tasks_by_owner(user.user_id, page.limit, page.offset())
        .await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// GET /tasks/{id}
///
/// 404 when the task is missing or belongs to someone else.
pub async fn get_task(OwnedTask { task, .. }: OwnedTask) -> Json<TaskResponse> {
    Json(task)
}

/// PUT /tasks/{id}
///
/// Partial update. A task the caller does not own is left untouched and the
/// response is still a success.
pub async fn update_task(
    user: AuthUser,
    State(state): State<AppState>,
    TaskId(task_id): TaskId,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> AppResult<Json<SuccessResponse>> {
    let matched = state
        .store
        .update_owned_task(user.user_id, task_id, input)
        .await?;

    if matched {
        tracing::info!(%task_id, user_id = %user.user_id, "Task updated");
    } else {
        tracing::debug!(%task_id, user_id = %user.user_id, "Task update matched nothing");
    }

    Ok(Json(SuccessResponse::OK))
}

/// DELETE /tasks/{id}
///
/// Idempotent: deleting a missing or foreign task is a successful no-op.
pub async fn delete_task(
    user: AuthUser,
    State(state): State<AppState>,
    TaskId(task_id): TaskId,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = state
        .store
        .delete_owned_task(user.user_id, task_id)
        .await?;

    if deleted {
        tracing::info!(%task_id, user_id = %user.user_id, "Task deleted");
    } else {
        tracing::debug!(%task_id, user_id = %user.user_id, "Task delete matched nothing");
    }

    Ok(Json(SuccessResponse::OK))
}
