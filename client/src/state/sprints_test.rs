use super::*;
use model::SprintStatus;
use time::macros::datetime;

fn sprint(name: &str) -> Sprint {
    Sprint {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        start_date: datetime!(2026-03-02 00:00 UTC),
        end_date: datetime!(2026-03-13 00:00 UTC),
        status: SprintStatus::Planned,
        tasks: Vec::new(),
    }
}

#[test]
fn current_resolves_pointer_against_items() {
    let a = sprint("a");
    let b = sprint("b");
    let state = SprintsState {
        items: vec![a.clone(), b.clone()],
        current_sprint_id: Some(b.id),
        ..SprintsState::default()
    };
    assert_eq!(state.current().map(|s| s.id), Some(b.id));
    assert!(state.is_current(b.id));
    assert!(!state.is_current(a.id));
}

#[test]
fn current_is_none_without_pointer_or_when_not_loaded() {
    let a = sprint("a");
    let mut state = SprintsState { items: vec![a], ..SprintsState::default() };
    assert!(state.current().is_none());

    state.current_sprint_id = Some(Uuid::new_v4());
    assert!(state.current().is_none());
}

#[test]
fn remove_clears_current_pointer_for_deleted_sprint() {
    let a = sprint("a");
    let mut state = SprintsState {
        items: vec![a.clone()],
        current_sprint_id: Some(a.id),
        ..SprintsState::default()
    };
    state.remove(a.id);
    assert!(state.items.is_empty());
    assert_eq!(state.current_sprint_id, None);
}

#[test]
fn insert_sorted_places_new_sprint_by_start_date_then_name() {
    let mut early = sprint("early");
    early.start_date = datetime!(2026-02-02 00:00 UTC);
    let mut late = sprint("late");
    late.start_date = datetime!(2026-04-06 00:00 UTC);
    let mut state = SprintsState { items: vec![early.clone(), late.clone()], ..SprintsState::default() };

    let middle = sprint("middle");
    state.insert_sorted(middle.clone());
    let names: Vec<_> = state.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["early", "middle", "late"]);

    let mut first_by_name = sprint("alpha");
    first_by_name.start_date = middle.start_date;
    state.insert_sorted(first_by_name);
    let names: Vec<_> = state.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["early", "alpha", "middle", "late"]);
}

#[test]
fn insert_sorted_replaces_existing_id() {
    let original = sprint("original");
    let mut state = SprintsState { items: vec![original.clone()], ..SprintsState::default() };
    let mut renamed = original.clone();
    renamed.name = "renamed".to_owned();
    state.insert_sorted(renamed);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "renamed");
}
