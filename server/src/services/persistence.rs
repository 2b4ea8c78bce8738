//! Persistence service: workspace hydration and background flush.
//!
//! DESIGN
//! ======
//! The in-memory workspace is authoritative. At startup it is hydrated from
//! Postgres; afterwards a background task snapshots the dirty set, writes the
//! affected rows in one transaction, then sleeps `FLUSH_INTERVAL_MS` before
//! the next cycle. Whether a dirty key becomes an upsert or a delete is
//! decided by whether the entity is still present in the workspace.
//!
//! ERROR HANDLING
//! ==============
//! Dirty flags are cleared only after a successful commit, and only for keys
//! whose revision did not move during the write. A failed flush is logged and
//! retried on the next cycle: repeated upserts are acceptable, silent data
//! loss is not.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::str::FromStr;
use std::time::Duration;

use model::{ParseEnumError, Sprint, Task, User};
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::state::{AppState, EntityKey, Workspace};

const CURRENT_SPRINT_SETTING: &str = "current_sprint";

/// One row-level write derived from a dirty key.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PendingWrite {
    DeleteTask(Uuid),
    DeleteSprint(Uuid),
    DeleteUser(Uuid),
    UpsertUser(User),
    UpsertSprint(Sprint),
    UpsertTask(Task),
    CurrentSprint(Option<Uuid>),
}

impl PendingWrite {
    /// Execution order inside a flush transaction.
    ///
    /// Deletes run first so a re-used email never collides with a stale row,
    /// and referenced users/sprints are written before the tasks naming them.
    fn phase(&self) -> u8 {
        match self {
            Self::DeleteTask(_) => 0,
            Self::DeleteSprint(_) => 1,
            Self::DeleteUser(_) => 2,
            Self::UpsertUser(_) => 3,
            Self::UpsertSprint(_) => 4,
            Self::UpsertTask(_) => 5,
            Self::CurrentSprint(_) => 6,
        }
    }
}

/// Translate the dirty set into ordered writes plus the revisions they cover.
pub(crate) fn collect_pending_writes(ws: &Workspace) -> (Vec<PendingWrite>, Vec<(EntityKey, u64)>) {
    let snapshot = ws.dirty.snapshot();
    let mut writes: Vec<PendingWrite> = snapshot
        .iter()
        .map(|(key, _)| match *key {
            EntityKey::Task(id) => ws
                .tasks
                .get(&id)
                .map_or(PendingWrite::DeleteTask(id), |task| PendingWrite::UpsertTask(task.clone())),
            EntityKey::Sprint(id) => ws
                .sprints
                .get(&id)
                .map_or(PendingWrite::DeleteSprint(id), |sprint| PendingWrite::UpsertSprint(sprint.clone())),
            EntityKey::User(id) => ws
                .users
                .get(&id)
                .map_or(PendingWrite::DeleteUser(id), |user| PendingWrite::UpsertUser(user.clone())),
            EntityKey::CurrentSprint => PendingWrite::CurrentSprint(ws.current_sprint),
        })
        .collect();
    writes.sort_by_key(PendingWrite::phase);
    (writes, snapshot)
}

/// Spawn the background flush task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState, pool: PgPool, flush_interval_ms: u64) -> JoinHandle<()> {
    info!(flush_interval_ms, "workspace persistence flush configured");
    tokio::spawn(async move {
        loop {
            flush_dirty(&state, &pool).await;
            tokio::time::sleep(Duration::from_millis(flush_interval_ms)).await;
        }
    })
}

async fn flush_dirty(state: &AppState, pool: &PgPool) {
    // PHASE: SNAPSHOT DIRTY ENTITIES
    // WHY: collect immutable clones under lock, then perform I/O lock-free.
    let (writes, flushed) = {
        let ws = state.workspace.read().await;
        if ws.dirty.is_empty() {
            return;
        }
        collect_pending_writes(&ws)
    };

    // PHASE: WRITE + ACK DIRTY KEYS
    match write_batch(pool, &writes).await {
        Ok(()) => {
            debug!(count = writes.len(), "workspace flush committed");
            state.workspace.write().await.dirty.clear_flushed(&flushed);
        }
        Err(e) => {
            error!(error = %e, count = writes.len(), "workspace flush failed");
        }
    }
}

async fn write_batch(pool: &PgPool, writes: &[PendingWrite]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for write in writes {
        match write {
            PendingWrite::DeleteTask(id) => {
                sqlx::query("DELETE FROM tasks WHERE id = $1")
                    .bind(id)
                    .execute(tx.as_mut())
                    .await?;
            }
            PendingWrite::DeleteSprint(id) => {
                sqlx::query("DELETE FROM sprints WHERE id = $1")
                    .bind(id)
                    .execute(tx.as_mut())
                    .await?;
            }
            PendingWrite::DeleteUser(id) => {
                sqlx::query("DELETE FROM users WHERE id = $1")
                    .bind(id)
                    .execute(tx.as_mut())
                    .await?;
            }
            PendingWrite::UpsertUser(user) => {
                sqlx::query(
                    "INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4)
                     ON CONFLICT (id) DO UPDATE
                     SET name = EXCLUDED.name, email = EXCLUDED.email, role = EXCLUDED.role",
                )
                .bind(user.id)
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.role.as_str())
                .execute(tx.as_mut())
                .await?;
            }
            PendingWrite::UpsertSprint(sprint) => {
                sqlx::query(
                    "INSERT INTO sprints (id, name, start_date, end_date, status) VALUES ($1, $2, $3, $4, $5)
                     ON CONFLICT (id) DO UPDATE
                     SET name = EXCLUDED.name, start_date = EXCLUDED.start_date,
                         end_date = EXCLUDED.end_date, status = EXCLUDED.status",
                )
                .bind(sprint.id)
                .bind(&sprint.name)
                .bind(sprint.start_date)
                .bind(sprint.end_date)
                .bind(sprint.status.as_str())
                .execute(tx.as_mut())
                .await?;
            }
            PendingWrite::UpsertTask(task) => {
                sqlx::query(
                    "INSERT INTO tasks (id, title, description, status, assignee_id, sprint_id, created_at, updated_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                     ON CONFLICT (id) DO UPDATE
                     SET title = EXCLUDED.title, description = EXCLUDED.description,
                         status = EXCLUDED.status, assignee_id = EXCLUDED.assignee_id,
                         sprint_id = EXCLUDED.sprint_id, updated_at = EXCLUDED.updated_at",
                )
                .bind(task.id)
                .bind(&task.title)
                .bind(&task.description)
                .bind(task.status.as_str())
                .bind(task.assignee_id)
                .bind(task.sprint_id)
                .bind(task.created_at)
                .bind(task.updated_at)
                .execute(tx.as_mut())
                .await?;
            }
            PendingWrite::CurrentSprint(sprint_id) => {
                sqlx::query(
                    "INSERT INTO app_settings (key, value) VALUES ($1, $2)
                     ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
                )
                .bind(CURRENT_SPRINT_SETTING)
                .bind(sprint_id.map(|id| id.to_string()))
                .execute(tx.as_mut())
                .await?;
            }
        }
    }
    tx.commit().await
}

/// Load every persisted entity into the workspace, replacing its contents.
///
/// # Errors
///
/// Returns a database error if a query fails or a stored status/role literal
/// is not recognized.
pub async fn hydrate(state: &AppState, pool: &PgPool) -> Result<(), sqlx::Error> {
    let users = sqlx::query_as::<_, (Uuid, String, String, String)>("SELECT id, name, email, role FROM users")
        .fetch_all(pool)
        .await?;

    let sprints = sqlx::query_as::<_, (Uuid, String, OffsetDateTime, OffsetDateTime, String)>(
        "SELECT id, name, start_date, end_date, status FROM sprints",
    )
    .fetch_all(pool)
    .await?;

    let tasks = sqlx::query_as::<
        _,
        (Uuid, String, String, String, Option<Uuid>, Option<Uuid>, OffsetDateTime, OffsetDateTime),
    >(
        "SELECT id, title, description, status, assignee_id, sprint_id, created_at, updated_at FROM tasks",
    )
    .fetch_all(pool)
    .await?;

    let current = sqlx::query_scalar::<_, Option<String>>("SELECT value FROM app_settings WHERE key = $1")
        .bind(CURRENT_SPRINT_SETTING)
        .fetch_optional(pool)
        .await?
        .flatten();

    let mut ws = Workspace::new();
    for (id, name, email, role) in users {
        ws.users.insert(id, User { id, name, email, role: decode_literal(&role)? });
    }
    for (id, name, start_date, end_date, status) in sprints {
        ws.sprints.insert(
            id,
            Sprint { id, name, start_date, end_date, status: decode_literal(&status)?, tasks: Vec::new() },
        );
    }
    for (id, title, description, status, assignee_id, sprint_id, created_at, updated_at) in tasks {
        ws.tasks.insert(
            id,
            Task {
                id,
                title,
                description,
                status: decode_literal(&status)?,
                assignee_id,
                sprint_id,
                created_at,
                updated_at,
            },
        );
    }
    ws.current_sprint = parse_current_sprint(current.as_deref(), &ws);

    info!(
        users = ws.users.len(),
        sprints = ws.sprints.len(),
        tasks = ws.tasks.len(),
        current_sprint = ?ws.current_sprint,
        "workspace hydrated"
    );
    *state.workspace.write().await = ws;
    Ok(())
}

fn decode_literal<T>(raw: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = ParseEnumError>,
{
    raw.parse::<T>().map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// Resolve the stored current-sprint setting against the loaded sprints.
pub(crate) fn parse_current_sprint(raw: Option<&str>, ws: &Workspace) -> Option<Uuid> {
    let raw = raw?;
    let Ok(id) = Uuid::parse_str(raw) else {
        warn!(value = raw, "ignoring malformed current sprint setting");
        return None;
    };
    if ws.sprints.contains_key(&id) {
        Some(id)
    } else {
        warn!(sprint_id = %id, "current sprint setting names a missing sprint");
        None
    }
}
