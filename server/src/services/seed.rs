//! Demo workspace content for local development (`SEED_DEMO_DATA=true`).
//!
//! Seeding goes through the regular services so the demo rows pick up the
//! same validation and dirty tracking as API writes.

#[cfg(test)]
#[path = "seed_test.rs"]
mod seed_test;

use model::{NewSprint, NewTask, NewUser, SprintStatus, TaskStatus, UserRole};
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::services::{sprint, task, user};
use crate::state::AppState;

/// Insert demo users, one active sprint, and a handful of tasks.
///
/// Skipped when the workspace already contains users, so restarts against a
/// persisted database never duplicate the demo set.
pub async fn seed_demo_data(state: &AppState) {
    if !state.workspace.read().await.users.is_empty() {
        info!("workspace already populated; skipping demo seed");
        return;
    }

    if let Err(e) = try_seed(state).await {
        warn!(error = %e, "demo seed aborted");
    }
}

async fn try_seed(state: &AppState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let admin = user::add_user(
        state,
        NewUser { name: "Avery Admin".to_owned(), email: "avery@sprintspace.dev".to_owned(), role: UserRole::Admin },
    )
    .await?;
    let member = user::add_user(
        state,
        NewUser { name: "Morgan Member".to_owned(), email: "morgan@sprintspace.dev".to_owned(), role: UserRole::Member },
    )
    .await?;

    let today = OffsetDateTime::now_utc().replace_time(time::Time::MIDNIGHT);
    let active = sprint::add_sprint(
        state,
        NewSprint {
            name: "Sprint 1".to_owned(),
            start_date: today,
            end_date: today + Duration::days(14),
            status: SprintStatus::Active,
        },
    )
    .await?;
    sprint::add_sprint(
        state,
        NewSprint {
            name: "Sprint 2".to_owned(),
            start_date: today + Duration::days(14),
            end_date: today + Duration::days(28),
            status: SprintStatus::Planned,
        },
    )
    .await?;
    sprint::set_current_sprint(state, Some(active.id)).await?;

    let demo_tasks = [
        ("Set up project board", TaskStatus::Done, Some(admin.id), Some(active.id)),
        ("Draft sprint goals", TaskStatus::InProgress, Some(member.id), Some(active.id)),
        ("Review open tasks", TaskStatus::Todo, Some(member.id), Some(active.id)),
        ("Collect backlog ideas", TaskStatus::Todo, None, None),
    ];
    for (title, status, assignee_id, sprint_id) in demo_tasks {
        task::add_task(
            state,
            NewTask { title: title.to_owned(), description: String::new(), status, assignee_id, sprint_id },
        )
        .await?;
    }

    info!(users = 2, sprints = 2, tasks = demo_tasks.len(), "demo data seeded");
    Ok(())
}
