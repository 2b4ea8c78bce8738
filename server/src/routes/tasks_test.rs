use super::*;
use crate::state::test_helpers::{new_task, test_app_state};
use model::TaskStatus;

#[test]
fn task_error_to_status_maps_every_variant() {
    assert_eq!(task_error_to_status(&TaskError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
    assert_eq!(task_error_to_status(&TaskError::Invalid("x")), StatusCode::BAD_REQUEST);
    assert_eq!(
        task_error_to_status(&TaskError::UnknownSprint(Uuid::nil())),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        task_error_to_status(&TaskError::UnknownAssignee(Uuid::nil())),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn create_task_returns_created_with_body() {
    let state = test_app_state();
    let (status, Json(task)) = create_task(State(state.clone()), ApiJson(new_task("Plan demo"))).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task.title, "Plan demo");

    let Json(fetched) = get_task(State(state), ApiPath(task.id)).await.unwrap();
    assert_eq!(fetched, task);
}

#[tokio::test]
async fn create_task_blank_title_is_bad_request_with_message() {
    let state = test_app_state();
    let (status, Json(body)) = create_task(State(state), ApiJson(new_task(""))).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "invalid task: title must not be empty");
}

#[tokio::test]
async fn create_task_unknown_sprint_is_unprocessable() {
    let state = test_app_state();
    let mut body = new_task("orphan");
    body.sprint_id = Some(Uuid::new_v4());
    let (status, _) = create_task(State(state), ApiJson(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_tasks_honors_query_filter() {
    let state = test_app_state();
    create_task(State(state.clone()), ApiJson(new_task("todo"))).await.unwrap();
    let mut done = new_task("done");
    done.status = TaskStatus::Done;
    create_task(State(state.clone()), ApiJson(done)).await.unwrap();

    let filter = TaskFilter { status: Some(TaskStatus::Done), ..TaskFilter::default() };
    let Json(listed) = list_tasks(State(state.clone()), ApiQuery(filter)).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "done");

    let Json(all) = list_tasks(State(state), ApiQuery(TaskFilter::default())).await;
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn update_task_patches_status() {
    let state = test_app_state();
    let (_, Json(task)) = create_task(State(state.clone()), ApiJson(new_task("move me"))).await.unwrap();
    let patch = TaskPatch { status: Some(TaskStatus::InProgress), ..TaskPatch::default() };
    let Json(updated) = update_task(State(state), ApiPath(task.id), ApiJson(patch)).await.unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn get_and_delete_unknown_task_are_not_found() {
    let state = test_app_state();
    let (status, _) = get_task(State(state.clone()), ApiPath(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = delete_task(State(state), ApiPath(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_task_returns_no_content() {
    let state = test_app_state();
    let (_, Json(task)) = create_task(State(state.clone()), ApiJson(new_task("bye"))).await.unwrap();
    assert_eq!(delete_task(State(state), ApiPath(task.id)).await.unwrap(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn invalid_task_error_body_is_json_error_object() {
    let state = test_app_state();
    let (status, Json(body)) = create_task(State(state), ApiJson(new_task("   "))).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "invalid task: title must not be empty" }));
}

#[tokio::test]
async fn created_task_serializes_with_camel_case_fields() {
    let state = test_app_state();
    let (_, Json(task)) = create_task(State(state), ApiJson(new_task("Wire format"))).await.unwrap();
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["status"], "TODO");
    assert!(json.get("createdAt").is_some());
    assert!(json.get("updatedAt").is_some());
    assert!(json.get("created_at").is_none());
}
