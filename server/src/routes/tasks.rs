//! Task REST routes.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use model::{NewTask, Task, TaskFilter, TaskPatch};
use uuid::Uuid;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiError, api_error};
use crate::services::task::{self, TaskError};
use crate::state::AppState;

pub(crate) fn task_error_to_status(err: &TaskError) -> StatusCode {
    match err {
        TaskError::NotFound(_) => StatusCode::NOT_FOUND,
        TaskError::Invalid(_) => StatusCode::BAD_REQUEST,
        TaskError::UnknownSprint(_) | TaskError::UnknownAssignee(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn task_error(err: TaskError) -> ApiError {
    api_error(task_error_to_status(&err), err.to_string())
}

/// `GET /api/tasks`: list tasks, optionally filtered by status, sprint, or assignee.
pub async fn list_tasks(State(state): State<AppState>, ApiQuery(filter): ApiQuery<TaskFilter>) -> Json<Vec<Task>> {
    Json(task::list_tasks(&state, &filter).await)
}

/// `POST /api/tasks`: create a task.
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let created = task::add_task(&state, body).await.map_err(task_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/tasks/{id}`: fetch one task.
pub async fn get_task(State(state): State<AppState>, ApiPath(task_id): ApiPath<Uuid>) -> Result<Json<Task>, ApiError> {
    task::get_task(&state, task_id).await.map(Json).map_err(task_error)
}

/// `PATCH /api/tasks/{id}`: partially update a task.
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(task_id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    task::update_task(&state, task_id, patch).await.map(Json).map_err(task_error)
}

/// `DELETE /api/tasks/{id}`: delete a task.
pub async fn delete_task(State(state): State<AppState>, ApiPath(task_id): ApiPath<Uuid>) -> Result<StatusCode, ApiError> {
    task::delete_task(&state, task_id).await.map_err(task_error)?;
    Ok(StatusCode::NO_CONTENT)
}
