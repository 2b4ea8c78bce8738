use super::*;
use model::{NewTask, SprintStatus, TaskStatus};
use time::OffsetDateTime;
use time::macros::datetime;

fn task_at(title: &str, sprint_id: Option<Uuid>, created_at: OffsetDateTime) -> Task {
    let mut task = Task::from_new(
        Uuid::new_v4(),
        NewTask { title: title.to_owned(), sprint_id, ..NewTask::default() },
        created_at,
    );
    task.status = TaskStatus::Todo;
    task
}

// =============================================================================
// DirtySet
// =============================================================================

#[test]
fn dirty_set_starts_empty() {
    let dirty = DirtySet::default();
    assert!(dirty.is_empty());
    assert_eq!(dirty.len(), 0);
}

#[test]
fn dirty_set_mark_is_idempotent_per_key() {
    let mut dirty = DirtySet::default();
    let id = Uuid::new_v4();
    dirty.mark(EntityKey::Task(id));
    dirty.mark(EntityKey::Task(id));
    assert_eq!(dirty.len(), 1);
    assert!(dirty.contains(&EntityKey::Task(id)));
}

#[test]
fn clear_flushed_removes_unchanged_entries() {
    let mut dirty = DirtySet::default();
    dirty.mark(EntityKey::CurrentSprint);
    let snapshot = dirty.snapshot();
    dirty.clear_flushed(&snapshot);
    assert!(dirty.is_empty());
}

#[test]
fn clear_flushed_keeps_entries_marked_after_snapshot() {
    let mut dirty = DirtySet::default();
    let id = Uuid::new_v4();
    dirty.mark(EntityKey::Sprint(id));
    let snapshot = dirty.snapshot();

    dirty.mark(EntityKey::Sprint(id));
    dirty.clear_flushed(&snapshot);

    assert!(dirty.contains(&EntityKey::Sprint(id)));
}

#[test]
fn entity_keys_of_different_kinds_are_distinct() {
    let id = Uuid::new_v4();
    let mut dirty = DirtySet::default();
    dirty.mark(EntityKey::Task(id));
    dirty.mark(EntityKey::Sprint(id));
    dirty.mark(EntityKey::User(id));
    assert_eq!(dirty.len(), 3);
}

// =============================================================================
// Workspace
// =============================================================================

#[test]
fn workspace_new_is_empty() {
    let ws = Workspace::new();
    assert!(ws.tasks.is_empty());
    assert!(ws.sprints.is_empty());
    assert!(ws.users.is_empty());
    assert!(ws.current_sprint.is_none());
    assert!(ws.dirty.is_empty());
}

#[test]
fn sprint_with_tasks_collects_members_oldest_first() {
    let mut ws = Workspace::new();
    let sprint = Sprint::from_new(Uuid::new_v4(), test_helpers::new_sprint("Sprint 1"));
    let sprint_id = sprint.id;
    ws.sprints.insert(sprint_id, sprint);

    let newer = task_at("newer", Some(sprint_id), datetime!(2026-03-04 10:00 UTC));
    let older = task_at("older", Some(sprint_id), datetime!(2026-03-03 10:00 UTC));
    let outside = task_at("outside", None, datetime!(2026-03-01 10:00 UTC));
    for task in [newer, older, outside] {
        ws.tasks.insert(task.id, task);
    }

    let assembled = ws.sprint_with_tasks(sprint_id).unwrap();
    let titles: Vec<&str> = assembled.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["older", "newer"]);
    assert_eq!(assembled.status, SprintStatus::Planned);
    assert!(ws.sprints[&sprint_id].tasks.is_empty(), "stored sprint stays task-free");
}

#[test]
fn sprint_with_tasks_unknown_id_is_none() {
    let ws = Workspace::new();
    assert!(ws.sprint_with_tasks(Uuid::new_v4()).is_none());
}

#[test]
fn sort_tasks_breaks_timestamp_ties_by_id() {
    let at = datetime!(2026-03-03 10:00 UTC);
    let mut a = task_at("a", None, at);
    let mut b = task_at("b", None, at);
    a.id = Uuid::from_u128(2);
    b.id = Uuid::from_u128(1);
    let mut tasks = vec![a, b];
    sort_tasks(&mut tasks);
    assert_eq!(tasks[0].title, "b");
}

#[tokio::test]
async fn app_state_clones_share_workspace() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    clone.workspace.write().await.current_sprint = Some(Uuid::nil());
    assert_eq!(state.workspace.read().await.current_sprint, Some(Uuid::nil()));
    assert!(state.pool.is_none());
}
