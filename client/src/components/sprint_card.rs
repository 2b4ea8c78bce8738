//! Card for one sprint in the sprint list.

#[cfg(test)]
#[path = "sprint_card_test.rs"]
mod sprint_card_test;

use leptos::prelude::*;
use model::{Sprint, TaskStatus};
use uuid::Uuid;

use crate::util::dates::format_range;

/// `"1 task"` / `"N tasks"`.
pub fn task_count_label(count: usize) -> String {
    if count == 1 { "1 task".to_owned() } else { format!("{count} tasks") }
}

/// `"done/total done"` progress caption.
pub fn progress_label(sprint: &Sprint) -> String {
    let done = sprint.tasks.iter().filter(|task| task.status == TaskStatus::Done).count();
    format!("{done}/{} done", sprint.tasks.len())
}

/// A sprint summary with current-sprint and delete actions.
#[component]
pub fn SprintCard(
    sprint: Sprint,
    is_current: bool,
    on_toggle_current: Callback<Uuid>,
    on_delete: Callback<Uuid>,
) -> impl IntoView {
    let id = sprint.id;
    let range = format_range(sprint.start_date, sprint.end_date);
    let count = task_count_label(sprint.tasks.len());
    let progress = progress_label(&sprint);
    let toggle_label = if is_current { "Clear current" } else { "Set current" };

    view! {
        <article class="sprint-card" class:sprint-card--current=is_current>
            <header class="sprint-card__header">
                <h3 class="sprint-card__name">{sprint.name}</h3>
                <span class="sprint-card__status">{sprint.status.label()}</span>
                {is_current.then(|| view! { <span class="sprint-card__current">"Current"</span> })}
            </header>
            <p class="sprint-card__range">{range}</p>
            <p class="sprint-card__count">{count} " · " {progress}</p>
            <div class="sprint-card__actions">
                <button class="sprint-card__toggle" on:click=move |_| on_toggle_current.run(id)>
                    {toggle_label}
                </button>
                <button
                    class="sprint-card__delete"
                    title="Delete sprint"
                    aria-label="Delete sprint"
                    on:click=move |_| on_delete.run(id)
                >
                    "✕"
                </button>
            </div>
        </article>
    }
}
