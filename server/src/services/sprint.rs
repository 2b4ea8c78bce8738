//! Sprint service: CRUD plus the workspace's current-sprint pointer.
//!
//! DESIGN
//! ======
//! Sprint dates are stored as given; no ordering or overlap checks apply.
//! Sprint membership is owned by `Task::sprint_id`, so deleting a sprint
//! detaches its tasks rather than deleting them.

#[cfg(test)]
#[path = "sprint_test.rs"]
mod sprint_test;

use model::{NewSprint, Sprint, SprintPatch};
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, EntityKey};

#[derive(Debug, thiserror::Error)]
pub enum SprintError {
    #[error("sprint not found: {0}")]
    NotFound(Uuid),
    #[error("invalid sprint: {0}")]
    Invalid(&'static str),
}

/// List sprints by start date, each with its tasks attached.
pub async fn list_sprints(state: &AppState) -> Vec<Sprint> {
    let ws = state.workspace.read().await;
    let mut sprints: Vec<Sprint> = ws.sprints.keys().filter_map(|id| ws.sprint_with_tasks(*id)).collect();
    sprints.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.name.cmp(&b.name))
            .then(a.id.cmp(&b.id))
    });
    sprints
}

/// Fetch one sprint with its tasks.
///
/// # Errors
///
/// Returns [`SprintError::NotFound`] for an unknown id.
pub async fn get_sprint(state: &AppState, sprint_id: Uuid) -> Result<Sprint, SprintError> {
    let ws = state.workspace.read().await;
    ws.sprint_with_tasks(sprint_id).ok_or(SprintError::NotFound(sprint_id))
}

/// Create a sprint.
///
/// # Errors
///
/// Returns [`SprintError::Invalid`] for a blank name.
pub async fn add_sprint(state: &AppState, mut new: NewSprint) -> Result<Sprint, SprintError> {
    new.name = normalize_name(&new.name)?;

    let sprint = Sprint::from_new(Uuid::new_v4(), new);
    let mut ws = state.workspace.write().await;
    ws.sprints.insert(sprint.id, sprint.clone());
    ws.dirty.mark(EntityKey::Sprint(sprint.id));

    info!(sprint_id = %sprint.id, status = %sprint.status, "sprint created");
    Ok(sprint)
}

/// Apply a partial update to a sprint.
///
/// # Errors
///
/// Returns [`SprintError::NotFound`] for an unknown id or
/// [`SprintError::Invalid`] for a blank name.
pub async fn update_sprint(state: &AppState, sprint_id: Uuid, mut patch: SprintPatch) -> Result<Sprint, SprintError> {
    if let Some(name) = patch.name.as_deref() {
        patch.name = Some(normalize_name(name)?);
    }

    let mut ws = state.workspace.write().await;
    let Some(sprint) = ws.sprints.get_mut(&sprint_id) else {
        return Err(SprintError::NotFound(sprint_id));
    };
    sprint.apply_patch(patch);
    ws.dirty.mark(EntityKey::Sprint(sprint_id));

    info!(%sprint_id, "sprint updated");
    ws.sprint_with_tasks(sprint_id).ok_or(SprintError::NotFound(sprint_id))
}

/// Delete a sprint, detaching its tasks and clearing it as current sprint.
///
/// # Errors
///
/// Returns [`SprintError::NotFound`] for an unknown id.
pub async fn delete_sprint(state: &AppState, sprint_id: Uuid) -> Result<(), SprintError> {
    let mut ws = state.workspace.write().await;
    if ws.sprints.remove(&sprint_id).is_none() {
        return Err(SprintError::NotFound(sprint_id));
    }
    ws.dirty.mark(EntityKey::Sprint(sprint_id));

    let now = time::OffsetDateTime::now_utc();
    let mut detached = Vec::new();
    for task in ws.tasks.values_mut() {
        if task.sprint_id == Some(sprint_id) {
            task.sprint_id = None;
            task.updated_at = now;
            detached.push(task.id);
        }
    }
    for task_id in &detached {
        ws.dirty.mark(EntityKey::Task(*task_id));
    }

    if ws.current_sprint == Some(sprint_id) {
        ws.current_sprint = None;
        ws.dirty.mark(EntityKey::CurrentSprint);
    }

    info!(%sprint_id, detached = detached.len(), "sprint deleted");
    Ok(())
}

/// The sprint marked as current, if any.
pub async fn current_sprint(state: &AppState) -> Option<Sprint> {
    let ws = state.workspace.read().await;
    ws.current_sprint.and_then(|id| ws.sprint_with_tasks(id))
}

/// Set or clear the current sprint.
///
/// # Errors
///
/// Returns [`SprintError::NotFound`] if `sprint_id` names an unknown sprint.
pub async fn set_current_sprint(state: &AppState, sprint_id: Option<Uuid>) -> Result<Option<Sprint>, SprintError> {
    let mut ws = state.workspace.write().await;
    if let Some(id) = sprint_id
        && !ws.sprints.contains_key(&id)
    {
        return Err(SprintError::NotFound(id));
    }
    if ws.current_sprint != sprint_id {
        ws.current_sprint = sprint_id;
        ws.dirty.mark(EntityKey::CurrentSprint);
    }

    info!(sprint_id = ?sprint_id, "current sprint set");
    Ok(sprint_id.and_then(|id| ws.sprint_with_tasks(id)))
}

fn normalize_name(raw: &str) -> Result<String, SprintError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SprintError::Invalid("name must not be empty"));
    }
    Ok(name.to_owned())
}
