//! Tasks page: a three-column board grouped by status.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered under `/tasks` inside the layout shell. Loads tasks and users
//! through the query cache, and writes through the REST helpers. Every
//! successful write updates local state immediately and invalidates the
//! collections the write can affect.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use leptos::prelude::*;
use model::{NewTask, TaskPatch, TaskStatus};
use uuid::Uuid;

#[cfg(feature = "hydrate")]
use super::loaders::invalidate;
use super::loaders::{load_tasks, load_users};
use crate::components::task_card::TaskCard;
use crate::state::query::QueryClient;
#[cfg(any(test, feature = "hydrate"))]
use crate::state::query::QueryKey;
use crate::state::tasks::TasksState;
use crate::state::users::UsersState;

/// Keys touched by any task write. Sprints embed their tasks.
#[cfg(any(test, feature = "hydrate"))]
const TASK_WRITE_KEYS: [QueryKey; 2] = [QueryKey::Tasks, QueryKey::Sprints];

/// Build a create-task body from raw form input.
pub fn validate_new_task_input(title: &str, description: &str) -> Result<NewTask, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Task title is required.");
    }
    Ok(NewTask {
        title: title.to_owned(),
        description: description.trim().to_owned(),
        ..NewTask::default()
    })
}

/// Parse an optional `<select>` id value; the empty option means none.
pub fn parse_optional_id(raw: &str) -> Option<Uuid> {
    raw.trim().parse().ok()
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let query = expect_context::<RwSignal<QueryClient>>();
    let tasks = expect_context::<RwSignal<TasksState>>();
    let users = expect_context::<RwSignal<UsersState>>();

    Effect::new(move || {
        load_tasks(query, tasks);
        load_users(query, users);
    });

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let assignee = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let mut body = match validate_new_task_input(&title.get_untracked(), &description.get_untracked()) {
            Ok(body) => body,
            Err(message) => {
                form_error.set(Some(message.to_owned()));
                return;
            }
        };
        body.assignee_id = parse_optional_id(&assignee.get_untracked());
        form_error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_task(&body).await {
                Ok(task) => {
                    tasks.update(|s| s.upsert(task));
                    title.set(String::new());
                    description.set(String::new());
                    assignee.set(String::new());
                    invalidate(query, &TASK_WRITE_KEYS);
                }
                Err(e) => form_error.set(Some(e)),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = body;
    };

    let on_status = Callback::new(move |(task_id, status): (Uuid, TaskStatus)| {
        let patch = TaskPatch { status: Some(status), ..TaskPatch::default() };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_task(task_id, &patch).await {
                Ok(task) => {
                    tasks.update(|s| s.upsert(task));
                    invalidate(query, &TASK_WRITE_KEYS);
                }
                Err(e) => {
                    tasks.update(|s| s.error = Some(e));
                    invalidate(query, &TASK_WRITE_KEYS);
                    load_tasks(query, tasks);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (task_id, patch);
    });

    let on_delete = Callback::new(move |task_id: Uuid| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_task(task_id).await {
                Ok(()) => {
                    tasks.update(|s| s.remove(task_id));
                    invalidate(query, &TASK_WRITE_KEYS);
                }
                Err(e) => tasks.update(|s| s.error = Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = task_id;
    });

    view! {
        <section class="page tasks-page">
            <h1 class="page__title">"Tasks"</h1>

            <form class="task-form" on:submit=on_create>
                <input
                    class="task-form__title"
                    type="text"
                    placeholder="Task title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <input
                    class="task-form__description"
                    type="text"
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
                <select
                    class="task-form__assignee"
                    aria-label="Assignee"
                    prop:value=move || assignee.get()
                    on:change=move |ev| assignee.set(event_target_value(&ev))
                >
                    <option value="">"Unassigned"</option>
                    {move || {
                        users
                            .get()
                            .items
                            .into_iter()
                            .map(|user| view! { <option value=user.id.to_string()>{user.name}</option> })
                            .collect_view()
                    }}
                </select>
                <button class="task-form__submit" type="submit" disabled=move || busy.get()>
                    "Add task"
                </button>
            </form>
            {move || form_error.get().map(|e| view! { <p class="page__error">{e}</p> })}

            <Show when=move || tasks.with(|s| s.loading)>
                <p class="page__loading">"Loading tasks..."</p>
            </Show>
            {move || tasks.with(|s| s.error.clone()).map(|e| view! { <p class="page__error">{e}</p> })}
            <Show when=move || tasks.with(|s| !s.loading && s.error.is_none() && s.items.is_empty())>
                <p class="page__empty">"No tasks yet."</p>
            </Show>

            <div class="tasks-board">
                {TaskStatus::ALL
                    .into_iter()
                    .map(|status| {
                        view! {
                            <section class="tasks-column" data-status=status.as_str()>
                                <h2 class="tasks-column__title">
                                    {status.label()} " "
                                    <span class="tasks-column__count">
                                        {move || tasks.with(|s| s.by_status(status).len())}
                                    </span>
                                </h2>
                                <For
                                    each=move || tasks.with(|s| s.by_status(status))
                                    key=|task| (task.id, task.updated_at)
                                    children=move |task| {
                                        let assignee_id = task.assignee_id;
                                        let assignee_name = Signal::derive(move || {
                                            assignee_id.and_then(|id| users.with(|u| u.name_of(id)))
                                        });
                                        view! {
                                            <TaskCard
                                                task=task
                                                assignee=assignee_name
                                                on_status=on_status
                                                on_delete=on_delete
                                            />
                                        }
                                    }
                                />
                            </section>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
