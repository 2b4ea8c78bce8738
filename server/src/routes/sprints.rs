//! Sprint REST routes, including the current-sprint pointer.

#[cfg(test)]
#[path = "sprints_test.rs"]
mod sprints_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use model::{CurrentSprintBody, NewSprint, Sprint, SprintPatch};
use uuid::Uuid;

use super::extract::{ApiJson, ApiPath};
use super::{ApiError, api_error};
use crate::services::sprint::{self, SprintError};
use crate::state::AppState;

pub(crate) fn sprint_error_to_status(err: &SprintError) -> StatusCode {
    match err {
        SprintError::NotFound(_) => StatusCode::NOT_FOUND,
        SprintError::Invalid(_) => StatusCode::BAD_REQUEST,
    }
}

fn sprint_error(err: SprintError) -> ApiError {
    api_error(sprint_error_to_status(&err), err.to_string())
}

/// `GET /api/sprints`: list sprints with their tasks.
pub async fn list_sprints(State(state): State<AppState>) -> Json<Vec<Sprint>> {
    Json(sprint::list_sprints(&state).await)
}

/// `POST /api/sprints`: create a sprint.
pub async fn create_sprint(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewSprint>,
) -> Result<(StatusCode, Json<Sprint>), ApiError> {
    let created = sprint::add_sprint(&state, body).await.map_err(sprint_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/sprints/{id}`: fetch one sprint with its tasks.
pub async fn get_sprint(
    State(state): State<AppState>,
    ApiPath(sprint_id): ApiPath<Uuid>,
) -> Result<Json<Sprint>, ApiError> {
    sprint::get_sprint(&state, sprint_id).await.map(Json).map_err(sprint_error)
}

/// `PATCH /api/sprints/{id}`: partially update a sprint.
pub async fn update_sprint(
    State(state): State<AppState>,
    ApiPath(sprint_id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<SprintPatch>,
) -> Result<Json<Sprint>, ApiError> {
    sprint::update_sprint(&state, sprint_id, patch).await.map(Json).map_err(sprint_error)
}

/// `DELETE /api/sprints/{id}`: delete a sprint; its tasks return to the backlog.
pub async fn delete_sprint(
    State(state): State<AppState>,
    ApiPath(sprint_id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    sprint::delete_sprint(&state, sprint_id).await.map_err(sprint_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/sprints/current`: the current sprint, or `null`.
pub async fn get_current_sprint(State(state): State<AppState>) -> Json<Option<Sprint>> {
    Json(sprint::current_sprint(&state).await)
}

/// `PUT /api/sprints/current`: set or clear the current sprint.
pub async fn put_current_sprint(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CurrentSprintBody>,
) -> Result<Json<Option<Sprint>>, ApiError> {
    sprint::set_current_sprint(&state, body.sprint_id)
        .await
        .map(Json)
        .map_err(sprint_error)
}
