//! User service: workspace member directory.
//!
//! Users exist so tasks can name an assignee. Emails are unique
//! case-insensitively; roles are stored but never enforced.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use model::{NewUser, User};
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, EntityKey};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user not found: {0}")]
    NotFound(Uuid),
    #[error("invalid user: {0}")]
    Invalid(&'static str),
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

/// List users by name.
pub async fn list_users(state: &AppState) -> Vec<User> {
    let ws = state.workspace.read().await;
    let mut users: Vec<User> = ws.users.values().cloned().collect();
    users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    users
}

/// Fetch one user.
///
/// # Errors
///
/// Returns [`UserError::NotFound`] for an unknown id.
pub async fn get_user(state: &AppState, user_id: Uuid) -> Result<User, UserError> {
    let ws = state.workspace.read().await;
    ws.users.get(&user_id).cloned().ok_or(UserError::NotFound(user_id))
}

/// Register a user.
///
/// # Errors
///
/// Returns [`UserError::Invalid`] for a blank name or malformed email and
/// [`UserError::DuplicateEmail`] if the email is already taken.
pub async fn add_user(state: &AppState, mut new: NewUser) -> Result<User, UserError> {
    new.name = new.name.trim().to_owned();
    new.email = new.email.trim().to_owned();
    if new.name.is_empty() {
        return Err(UserError::Invalid("name must not be empty"));
    }
    if !is_plausible_email(&new.email) {
        return Err(UserError::Invalid("email must look like name@host"));
    }

    let mut ws = state.workspace.write().await;
    let folded = fold_email(&new.email);
    if ws.users.values().any(|user| fold_email(&user.email) == folded) {
        return Err(UserError::DuplicateEmail(new.email));
    }

    let user = User::from_new(Uuid::new_v4(), new);
    ws.users.insert(user.id, user.clone());
    ws.dirty.mark(EntityKey::User(user.id));

    info!(user_id = %user.id, role = %user.role, "user created");
    Ok(user)
}

/// Remove a user and unassign every task they held.
///
/// # Errors
///
/// Returns [`UserError::NotFound`] for an unknown id.
pub async fn delete_user(state: &AppState, user_id: Uuid) -> Result<(), UserError> {
    let mut ws = state.workspace.write().await;
    if ws.users.remove(&user_id).is_none() {
        return Err(UserError::NotFound(user_id));
    }
    ws.dirty.mark(EntityKey::User(user_id));

    let now = time::OffsetDateTime::now_utc();
    let mut unassigned = Vec::new();
    for task in ws.tasks.values_mut() {
        if task.assignee_id == Some(user_id) {
            task.assignee_id = None;
            task.updated_at = now;
            unassigned.push(task.id);
        }
    }
    for task_id in &unassigned {
        ws.dirty.mark(EntityKey::Task(*task_id));
    }

    info!(%user_id, unassigned = unassigned.len(), "user deleted");
    Ok(())
}

/// Case folding used for uniqueness; matches the `lower(email)` index.
pub(crate) fn fold_email(email: &str) -> String {
    email.to_lowercase()
}

pub(crate) fn is_plausible_email(email: &str) -> bool {
    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !host.contains('@') && !email.contains(char::is_whitespace)
}
