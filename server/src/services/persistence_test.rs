use super::*;
use crate::services::{sprint, task, user};
use crate::state::test_helpers::{new_sprint, new_task, new_user, test_app_state};

// =============================================================================
// collect_pending_writes
// =============================================================================

#[test]
fn collect_pending_writes_on_clean_workspace_is_empty() {
    let ws = Workspace::new();
    let (writes, flushed) = collect_pending_writes(&ws);
    assert!(writes.is_empty());
    assert!(flushed.is_empty());
}

#[tokio::test]
async fn collect_pending_writes_upserts_present_entities_in_dependency_order() {
    let state = test_app_state();
    let owner = user::add_user(&state, new_user("Ada", "ada@example.com")).await.unwrap();
    let scope = sprint::add_sprint(&state, new_sprint("Sprint 1")).await.unwrap();
    let mut new = new_task("wired");
    new.assignee_id = Some(owner.id);
    new.sprint_id = Some(scope.id);
    let wired = task::add_task(&state, new).await.unwrap();
    sprint::set_current_sprint(&state, Some(scope.id)).await.unwrap();

    let ws = state.workspace.read().await;
    let (writes, flushed) = collect_pending_writes(&ws);

    assert_eq!(flushed.len(), 4);
    assert_eq!(
        writes,
        vec![
            PendingWrite::UpsertUser(owner),
            PendingWrite::UpsertSprint(scope.clone()),
            PendingWrite::UpsertTask(wired),
            PendingWrite::CurrentSprint(Some(scope.id)),
        ]
    );
}

#[tokio::test]
async fn collect_pending_writes_turns_missing_entities_into_deletes_first() {
    let state = test_app_state();
    let gone = task::add_task(&state, new_task("gone")).await.unwrap();
    let kept = task::add_task(&state, new_task("kept")).await.unwrap();
    let old_sprint = sprint::add_sprint(&state, new_sprint("old")).await.unwrap();
    task::delete_task(&state, gone.id).await.unwrap();
    sprint::delete_sprint(&state, old_sprint.id).await.unwrap();

    let ws = state.workspace.read().await;
    let (writes, _) = collect_pending_writes(&ws);

    assert_eq!(writes[0], PendingWrite::DeleteTask(gone.id));
    assert_eq!(writes[1], PendingWrite::DeleteSprint(old_sprint.id));
    assert_eq!(writes[2], PendingWrite::UpsertTask(kept));
    assert_eq!(writes.len(), 3);
}

#[tokio::test]
async fn clearing_flushed_revisions_keeps_later_edits_dirty() {
    let state = test_app_state();
    let edited = task::add_task(&state, new_task("v1")).await.unwrap();
    let (_, flushed) = collect_pending_writes(&*state.workspace.read().await);

    let patch = model::TaskPatch { title: Some("v2".to_owned()), ..model::TaskPatch::default() };
    task::update_task(&state, edited.id, patch).await.unwrap();

    let mut ws = state.workspace.write().await;
    ws.dirty.clear_flushed(&flushed);
    assert!(ws.dirty.contains(&EntityKey::Task(edited.id)));
}

// =============================================================================
// parse_current_sprint
// =============================================================================

#[test]
fn parse_current_sprint_requires_known_sprint() {
    let mut ws = Workspace::new();
    let known = Sprint::from_new(Uuid::new_v4(), crate::state::test_helpers::new_sprint("s"));
    let known_id = known.id;
    ws.sprints.insert(known_id, known);

    assert_eq!(parse_current_sprint(Some(&known_id.to_string()), &ws), Some(known_id));
    assert_eq!(parse_current_sprint(Some(&Uuid::new_v4().to_string()), &ws), None);
    assert_eq!(parse_current_sprint(Some("not-a-uuid"), &ws), None);
    assert_eq!(parse_current_sprint(None, &ws), None);
}

#[test]
fn decode_literal_maps_unknown_values_to_decode_errors() {
    let ok: model::TaskStatus = decode_literal("IN_PROGRESS").unwrap();
    assert_eq!(ok, model::TaskStatus::InProgress);
    let err = decode_literal::<model::UserRole>("OWNER").unwrap_err();
    assert!(matches!(err, sqlx::Error::Decode(_)));
}

// =============================================================================
// Live database round trip: `cargo test --features live-db-tests`
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn flush_then_hydrate_round_trips_workspace() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
    let pool = crate::db::init_pool(&url, 2).await.unwrap();
    let state = AppState::new(Some(pool.clone()));

    let suffix = Uuid::new_v4();
    let owner = user::add_user(&state, new_user("Live", &format!("live-{suffix}@example.com")))
        .await
        .unwrap();
    let scope = sprint::add_sprint(&state, new_sprint("Live sprint")).await.unwrap();
    let mut new = new_task("live task");
    new.assignee_id = Some(owner.id);
    new.sprint_id = Some(scope.id);
    let created = task::add_task(&state, new).await.unwrap();
    sprint::set_current_sprint(&state, Some(scope.id)).await.unwrap();

    flush_dirty(&state, &pool).await;
    assert!(state.workspace.read().await.dirty.is_empty());

    let restored = AppState::new(Some(pool.clone()));
    hydrate(&restored, &pool).await.unwrap();
    let ws = restored.workspace.read().await;
    assert_eq!(ws.tasks.get(&created.id).map(|t| t.title.as_str()), Some("live task"));
    assert_eq!(ws.current_sprint, Some(scope.id));
}
