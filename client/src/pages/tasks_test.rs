use super::*;

#[test]
fn validate_new_task_input_trims_fields() {
    let body = validate_new_task_input("  Write docs ", "  for the API  ").unwrap();
    assert_eq!(body.title, "Write docs");
    assert_eq!(body.description, "for the API");
    assert_eq!(body.status, TaskStatus::Todo);
    assert_eq!(body.assignee_id, None);
    assert_eq!(body.sprint_id, None);
}

#[test]
fn validate_new_task_input_requires_title() {
    assert_eq!(validate_new_task_input("", "d"), Err("Task title is required."));
    assert_eq!(validate_new_task_input("   ", ""), Err("Task title is required."));
}

#[test]
fn validate_new_task_input_allows_empty_description() {
    let body = validate_new_task_input("t", "").unwrap();
    assert!(body.description.is_empty());
}

#[test]
fn parse_optional_id_treats_blank_and_garbage_as_none() {
    assert_eq!(parse_optional_id(""), None);
    assert_eq!(parse_optional_id("not-a-uuid"), None);
    let id = Uuid::new_v4();
    assert_eq!(parse_optional_id(&id.to_string()), Some(id));
}

#[test]
fn task_writes_invalidate_tasks_and_sprints() {
    assert!(TASK_WRITE_KEYS.contains(&QueryKey::Tasks));
    assert!(TASK_WRITE_KEYS.contains(&QueryKey::Sprints));
}
