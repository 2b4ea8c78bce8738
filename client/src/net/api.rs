//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error, since these endpoints are
//! only called from the browser after hydration.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, String>`. Non-2xx responses surface the
//! server's `{"error": ...}` message when present so pages can show it as is.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use model::{NewSprint, NewTask, Sprint, Task, TaskPatch, User};
use uuid::Uuid;

#[cfg(any(test, feature = "hydrate"))]
use model::ErrorBody;

#[cfg(not(feature = "hydrate"))]
const SSR_UNAVAILABLE: &str = "not available during server render";

#[cfg(any(test, feature = "hydrate"))]
const TASKS_ENDPOINT: &str = "/api/tasks";
#[cfg(any(test, feature = "hydrate"))]
const SPRINTS_ENDPOINT: &str = "/api/sprints";
#[cfg(any(test, feature = "hydrate"))]
const CURRENT_SPRINT_ENDPOINT: &str = "/api/sprints/current";
#[cfg(any(test, feature = "hydrate"))]
const USERS_ENDPOINT: &str = "/api/users";

#[cfg(any(test, feature = "hydrate"))]
fn task_endpoint(task_id: Uuid) -> String {
    format!("{TASKS_ENDPOINT}/{task_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn sprint_endpoint(sprint_id: Uuid) -> String {
    format!("{SPRINTS_ENDPOINT}/{sprint_id}")
}

/// Message for a failed request: the server's error text if the body carries
/// one, otherwise `"<action> failed: <status>"`.
#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(action: &str, status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.trim().is_empty() => parsed.error,
        _ => format!("{action} failed: {status}"),
    }
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
    action: &str,
) -> Result<T, String> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(request_failed_message(action, status, &body));
    }
    resp.json::<T>().await.map_err(|e| format!("{action}: {e}"))
}

#[cfg(feature = "hydrate")]
async fn expect_empty(resp: gloo_net::http::Response, action: &str) -> Result<(), String> {
    if resp.ok() {
        return Ok(());
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(request_failed_message(action, status, &body))
}

// =============================================================================
// TASKS
// =============================================================================

/// `GET /api/tasks`.
pub async fn fetch_tasks() -> Result<Vec<Task>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(TASKS_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "load tasks").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

/// `POST /api/tasks`.
pub async fn create_task(body: &NewTask) -> Result<Task, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(TASKS_ENDPOINT)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "create task").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

/// `PATCH /api/tasks/{id}`.
pub async fn update_task(task_id: Uuid, patch: &TaskPatch) -> Result<Task, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::patch(&task_endpoint(task_id))
            .json(patch)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "update task").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (task_id, patch);
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

/// `DELETE /api/tasks/{id}`.
pub async fn delete_task(task_id: Uuid) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&task_endpoint(task_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        expect_empty(resp, "delete task").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = task_id;
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

// =============================================================================
// SPRINTS
// =============================================================================

/// `GET /api/sprints`.
pub async fn fetch_sprints() -> Result<Vec<Sprint>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(SPRINTS_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "load sprints").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

/// `POST /api/sprints`.
pub async fn create_sprint(body: &NewSprint) -> Result<Sprint, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(SPRINTS_ENDPOINT)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "create sprint").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

/// `DELETE /api/sprints/{id}`.
pub async fn delete_sprint(sprint_id: Uuid) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&sprint_endpoint(sprint_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        expect_empty(resp, "delete sprint").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = sprint_id;
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

/// `GET /api/sprints/current`. `Ok(None)` when no sprint is current.
pub async fn fetch_current_sprint() -> Result<Option<Sprint>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CURRENT_SPRINT_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "load current sprint").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

/// `PUT /api/sprints/current`. `None` clears the pointer.
pub async fn set_current_sprint(sprint_id: Option<Uuid>) -> Result<Option<Sprint>, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = model::CurrentSprintBody { sprint_id };
        let resp = gloo_net::http::Request::put(CURRENT_SPRINT_ENDPOINT)
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "set current sprint").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = sprint_id;
        Err(SSR_UNAVAILABLE.to_owned())
    }
}

// =============================================================================
// USERS
// =============================================================================

/// `GET /api/users`.
pub async fn fetch_users() -> Result<Vec<User>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(USERS_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json(resp, "load users").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(SSR_UNAVAILABLE.to_owned())
    }
}
