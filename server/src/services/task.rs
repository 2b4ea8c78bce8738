//! Task service: list, create, update, and delete tasks.
//!
//! DESIGN
//! ======
//! Tasks carry no workflow: any status may be set from any other. The only
//! checks are a non-empty title and that referenced sprints and assignees
//! exist in the workspace at the time of the write.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use model::{NewTask, Task, TaskFilter, TaskPatch};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, EntityKey, Workspace, sort_tasks};

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(Uuid),
    #[error("invalid task: {0}")]
    Invalid(&'static str),
    #[error("sprint not found: {0}")]
    UnknownSprint(Uuid),
    #[error("assignee not found: {0}")]
    UnknownAssignee(Uuid),
}

/// List tasks matching `filter`, oldest first.
pub async fn list_tasks(state: &AppState, filter: &TaskFilter) -> Vec<Task> {
    let ws = state.workspace.read().await;
    let mut tasks: Vec<Task> = ws.tasks.values().filter(|task| filter.matches(task)).cloned().collect();
    sort_tasks(&mut tasks);
    tasks
}

/// Fetch one task.
///
/// # Errors
///
/// Returns [`TaskError::NotFound`] for an unknown id.
pub async fn get_task(state: &AppState, task_id: Uuid) -> Result<Task, TaskError> {
    let ws = state.workspace.read().await;
    ws.tasks.get(&task_id).cloned().ok_or(TaskError::NotFound(task_id))
}

/// Create a task.
///
/// # Errors
///
/// Returns [`TaskError::Invalid`] for a blank title, or an unknown-reference
/// error if the sprint or assignee does not exist.
pub async fn add_task(state: &AppState, mut new: NewTask) -> Result<Task, TaskError> {
    new.title = normalize_title(&new.title)?;

    let mut ws = state.workspace.write().await;
    check_references(&ws, new.sprint_id, new.assignee_id)?;

    let task = Task::from_new(Uuid::new_v4(), new, OffsetDateTime::now_utc());
    ws.tasks.insert(task.id, task.clone());
    ws.dirty.mark(EntityKey::Task(task.id));

    info!(task_id = %task.id, status = %task.status, "task created");
    Ok(task)
}

/// Apply a partial update to a task.
///
/// # Errors
///
/// Returns [`TaskError::NotFound`] for an unknown id, [`TaskError::Invalid`]
/// for a blank title, or an unknown-reference error.
pub async fn update_task(state: &AppState, task_id: Uuid, mut patch: TaskPatch) -> Result<Task, TaskError> {
    if let Some(title) = patch.title.as_deref() {
        patch.title = Some(normalize_title(title)?);
    }

    let mut ws = state.workspace.write().await;
    if !ws.tasks.contains_key(&task_id) {
        return Err(TaskError::NotFound(task_id));
    }
    check_references(&ws, patch.sprint_id.flatten(), patch.assignee_id.flatten())?;

    let Some(task) = ws.tasks.get_mut(&task_id) else {
        return Err(TaskError::NotFound(task_id));
    };
    task.apply_patch(patch, OffsetDateTime::now_utc());
    let updated = task.clone();
    ws.dirty.mark(EntityKey::Task(task_id));

    info!(%task_id, status = %updated.status, "task updated");
    Ok(updated)
}

/// Delete a task.
///
/// # Errors
///
/// Returns [`TaskError::NotFound`] for an unknown id.
pub async fn delete_task(state: &AppState, task_id: Uuid) -> Result<(), TaskError> {
    let mut ws = state.workspace.write().await;
    if ws.tasks.remove(&task_id).is_none() {
        return Err(TaskError::NotFound(task_id));
    }
    ws.dirty.mark(EntityKey::Task(task_id));
    info!(%task_id, "task deleted");
    Ok(())
}

fn normalize_title(raw: &str) -> Result<String, TaskError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TaskError::Invalid("title must not be empty"));
    }
    Ok(title.to_owned())
}

fn check_references(ws: &Workspace, sprint_id: Option<Uuid>, assignee_id: Option<Uuid>) -> Result<(), TaskError> {
    if let Some(id) = sprint_id
        && !ws.sprints.contains_key(&id)
    {
        return Err(TaskError::UnknownSprint(id));
    }
    if let Some(id) = assignee_id
        && !ws.users.contains_key(&id)
    {
        return Err(TaskError::UnknownAssignee(id));
    }
    Ok(())
}
