use super::*;
use time::macros::datetime;

// =============================================================
// Helpers
// =============================================================

fn sample_task() -> Task {
    Task {
        id: Uuid::nil(),
        title: "Write release notes".to_owned(),
        description: "Summarize sprint changes".to_owned(),
        status: TaskStatus::Todo,
        assignee_id: None,
        sprint_id: None,
        created_at: datetime!(2026-03-01 09:00 UTC),
        updated_at: datetime!(2026-03-01 09:00 UTC),
    }
}

// =============================================================
// Enum literals
// =============================================================

#[test]
fn task_status_serializes_to_upper_snake_literals() {
    assert_eq!(serde_json::to_string(&TaskStatus::Todo).unwrap(), "\"TODO\"");
    assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"IN_PROGRESS\"");
    assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"DONE\"");
}

#[test]
fn task_status_rejects_unknown_literals() {
    assert!(serde_json::from_str::<TaskStatus>("\"todo\"").is_err());
    assert!(serde_json::from_str::<TaskStatus>("\"BLOCKED\"").is_err());
}

#[test]
fn sprint_status_serializes_to_upper_literals() {
    assert_eq!(serde_json::to_string(&SprintStatus::Planned).unwrap(), "\"PLANNED\"");
    assert_eq!(serde_json::to_string(&SprintStatus::Active).unwrap(), "\"ACTIVE\"");
    assert_eq!(serde_json::to_string(&SprintStatus::Completed).unwrap(), "\"COMPLETED\"");
    assert!(serde_json::from_str::<SprintStatus>("\"Active\"").is_err());
}

#[test]
fn user_role_accepts_only_admin_and_member() {
    assert_eq!(serde_json::from_str::<UserRole>("\"ADMIN\"").unwrap(), UserRole::Admin);
    assert_eq!(serde_json::from_str::<UserRole>("\"MEMBER\"").unwrap(), UserRole::Member);
    assert!(serde_json::from_str::<UserRole>("\"OWNER\"").is_err());
}

#[test]
fn from_str_matches_as_str_for_every_variant() {
    for status in TaskStatus::ALL {
        assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
    }
    for status in SprintStatus::ALL {
        assert_eq!(status.as_str().parse::<SprintStatus>().unwrap(), status);
    }
    for role in UserRole::ALL {
        assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
    }
}

#[test]
fn from_str_error_names_kind_and_value() {
    let err = "DOING".parse::<TaskStatus>().unwrap_err();
    assert_eq!(err.kind, "task status");
    assert_eq!(err.to_string(), "invalid task status value: \"DOING\"");
}

#[test]
fn defaults_are_first_lifecycle_values() {
    assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    assert_eq!(SprintStatus::default(), SprintStatus::Planned);
    assert_eq!(UserRole::default(), UserRole::Member);
}

// =============================================================
// Entity wire shape
// =============================================================

#[test]
fn task_serializes_with_camel_case_fields_and_rfc3339_dates() {
    let mut task = sample_task();
    task.sprint_id = Some(Uuid::nil());
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["sprintId"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(value["createdAt"], "2026-03-01T09:00:00Z");
    assert_eq!(value["status"], "TODO");
    assert!(value.get("assigneeId").is_none());
}

#[test]
fn task_deserializes_without_optional_references() {
    let json = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "title": "t",
        "description": "",
        "status": "DONE",
        "createdAt": "2026-03-01T09:00:00Z",
        "updatedAt": "2026-03-02T09:00:00Z"
    });
    let task: Task = serde_json::from_value(json).unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert!(task.assignee_id.is_none());
    assert!(task.sprint_id.is_none());
}

#[test]
fn sprint_without_tasks_field_defaults_to_empty() {
    let json = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "name": "Sprint 1",
        "startDate": "2026-03-01T00:00:00Z",
        "endDate": "2026-03-14T00:00:00Z",
        "status": "ACTIVE"
    });
    let sprint: Sprint = serde_json::from_value(json).unwrap();
    assert!(sprint.tasks.is_empty());
    assert_eq!(sprint.status, SprintStatus::Active);
}

#[test]
fn new_task_defaults_status_and_description() {
    let new: NewTask = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
    assert_eq!(new.status, TaskStatus::Todo);
    assert_eq!(new.description, "");
}

// =============================================================
// Patches
// =============================================================

#[test]
fn task_patch_distinguishes_absent_and_null_references() {
    let absent: TaskPatch = serde_json::from_str("{}").unwrap();
    assert_eq!(absent.sprint_id, None);

    let cleared: TaskPatch = serde_json::from_str(r#"{"sprintId":null}"#).unwrap();
    assert_eq!(cleared.sprint_id, Some(None));
}

#[test]
fn task_patch_serializes_cleared_reference_as_null() {
    let patch = TaskPatch { assignee_id: Some(None), ..TaskPatch::default() };
    assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({ "assigneeId": null }));
}

#[test]
fn apply_patch_allows_any_status_change_and_bumps_updated_at() {
    let mut task = sample_task();
    task.status = TaskStatus::Done;
    let later = datetime!(2026-03-05 12:00 UTC);
    task.apply_patch(TaskPatch { status: Some(TaskStatus::Todo), ..TaskPatch::default() }, later);
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.updated_at, later);
    assert_eq!(task.created_at, datetime!(2026-03-01 09:00 UTC));
}

#[test]
fn apply_patch_clears_reference_on_explicit_null() {
    let mut task = sample_task();
    task.assignee_id = Some(Uuid::new_v4());
    task.apply_patch(TaskPatch { assignee_id: Some(None), ..TaskPatch::default() }, task.updated_at);
    assert!(task.assignee_id.is_none());
}

#[test]
fn sprint_apply_patch_keeps_dates_as_given() {
    let mut sprint = Sprint::from_new(
        Uuid::nil(),
        NewSprint {
            name: "S".to_owned(),
            start_date: datetime!(2026-03-01 0:00 UTC),
            end_date: datetime!(2026-03-14 0:00 UTC),
            status: SprintStatus::Planned,
        },
    );
    // An end before the start is stored untouched; no scheduling rules apply.
    sprint.apply_patch(SprintPatch { end_date: Some(datetime!(2026-02-01 0:00 UTC)), ..SprintPatch::default() });
    assert_eq!(sprint.end_date, datetime!(2026-02-01 0:00 UTC));
    assert_eq!(sprint.name, "S");
}

// =============================================================
// Filters
// =============================================================

#[test]
fn empty_filter_matches_everything() {
    assert!(TaskFilter::default().matches(&sample_task()));
}

#[test]
fn filter_requires_every_present_field() {
    let sprint_id = Uuid::new_v4();
    let mut task = sample_task();
    task.sprint_id = Some(sprint_id);

    let by_sprint = TaskFilter { sprint_id: Some(sprint_id), ..TaskFilter::default() };
    assert!(by_sprint.matches(&task));

    let by_sprint_and_status =
        TaskFilter { sprint_id: Some(sprint_id), status: Some(TaskStatus::Done), ..TaskFilter::default() };
    assert!(!by_sprint_and_status.matches(&task));

    let by_assignee = TaskFilter { assignee_id: Some(Uuid::new_v4()), ..TaskFilter::default() };
    assert!(!by_assignee.matches(&task));
}
