//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional database pool and the live `Workspace`: every task,
//! sprint, and user plus the current-sprint pointer. The workspace is the
//! source of truth while the server runs; Postgres is a write-behind copy
//! fed from the dirty set.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::HashMap;
use std::sync::Arc;

use model::{Sprint, Task, User};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

// =============================================================================
// DIRTY TRACKING
// =============================================================================

/// Identity of something the persistence task may need to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Task(Uuid),
    Sprint(Uuid),
    User(Uuid),
    CurrentSprint,
}

/// Entities modified since the last successful flush.
///
/// Every `mark` stamps the key with a fresh revision so a flush only clears
/// the entries it actually wrote.
#[derive(Debug, Default)]
pub struct DirtySet {
    revision: u64,
    entries: HashMap<EntityKey, u64>,
}

impl DirtySet {
    pub fn mark(&mut self, key: EntityKey) {
        self.revision += 1;
        self.entries.insert(key, self.revision);
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<(EntityKey, u64)> {
        self.entries.iter().map(|(key, rev)| (*key, *rev)).collect()
    }

    /// Drop entries whose revision still equals the flushed one.
    pub fn clear_flushed(&mut self, flushed: &[(EntityKey, u64)]) {
        for (key, flushed_rev) in flushed {
            // EDGE: keep the flag if the entity changed again after the snapshot.
            if self.entries.get(key) == Some(flushed_rev) {
                self.entries.remove(key);
            }
        }
    }

    #[must_use]
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// WORKSPACE
// =============================================================================

/// The complete in-memory tracker state.
///
/// Sprints are stored with an empty `tasks` list; membership lives on
/// `Task::sprint_id` and is assembled on read by [`Workspace::sprint_with_tasks`].
#[derive(Debug, Default)]
pub struct Workspace {
    pub tasks: HashMap<Uuid, Task>,
    pub sprints: HashMap<Uuid, Sprint>,
    pub users: HashMap<Uuid, User>,
    pub current_sprint: Option<Uuid>,
    pub dirty: DirtySet,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone a sprint with its tasks attached, oldest task first.
    #[must_use]
    pub fn sprint_with_tasks(&self, sprint_id: Uuid) -> Option<Sprint> {
        let mut sprint = self.sprints.get(&sprint_id)?.clone();
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.sprint_id == Some(sprint_id))
            .cloned()
            .collect();
        sort_tasks(&mut tasks);
        sprint.tasks = tasks;
        Some(sprint)
    }
}

/// Stable list order for tasks: creation time, then id.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// `None` when `DATABASE_URL` is not configured.
    pub pool: Option<PgPool>,
    pub workspace: Arc<RwLock<Workspace>>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: Option<PgPool>) -> Self {
        Self { pool, workspace: Arc::new(RwLock::new(Workspace::new())) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
