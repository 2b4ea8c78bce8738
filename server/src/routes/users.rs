//! User directory routes.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use model::{NewUser, User};
use uuid::Uuid;

use super::extract::{ApiJson, ApiPath};
use super::{ApiError, api_error};
use crate::services::user::{self, UserError};
use crate::state::AppState;

pub(crate) fn user_error_to_status(err: &UserError) -> StatusCode {
    match err {
        UserError::NotFound(_) => StatusCode::NOT_FOUND,
        UserError::Invalid(_) => StatusCode::BAD_REQUEST,
        UserError::DuplicateEmail(_) => StatusCode::CONFLICT,
    }
}

fn user_error(err: UserError) -> ApiError {
    api_error(user_error_to_status(&err), err.to_string())
}

/// `GET /api/users`: list users.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(user::list_users(&state).await)
}

/// `POST /api/users`: register a user.
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let created = user::add_user(&state, body).await.map_err(user_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/users/{id}`: fetch one user.
pub async fn get_user(State(state): State<AppState>, ApiPath(user_id): ApiPath<Uuid>) -> Result<Json<User>, ApiError> {
    user::get_user(&state, user_id).await.map(Json).map_err(user_error)
}

/// `DELETE /api/users/{id}`: remove a user and unassign their tasks.
pub async fn delete_user(State(state): State<AppState>, ApiPath(user_id): ApiPath<Uuid>) -> Result<StatusCode, ApiError> {
    user::delete_user(&state, user_id).await.map_err(user_error)?;
    Ok(StatusCode::NO_CONTENT)
}
