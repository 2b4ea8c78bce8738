//! Card for one task inside a status column.

use leptos::prelude::*;
use model::{Task, TaskStatus};
use uuid::Uuid;

/// A task card with an inline status selector and a delete button.
#[component]
pub fn TaskCard(
    task: Task,
    #[prop(into)] assignee: Signal<Option<String>>,
    on_status: Callback<(Uuid, TaskStatus)>,
    on_delete: Callback<Uuid>,
) -> impl IntoView {
    let id = task.id;
    let current = task.status;
    let description = (!task.description.is_empty()).then_some(task.description);

    view! {
        <article class="task-card">
            <h3 class="task-card__title">{task.title}</h3>
            {description.map(|text| view! { <p class="task-card__description">{text}</p> })}
            <span class="task-card__assignee">
                {move || assignee.get().unwrap_or_else(|| "Unassigned".to_owned())}
            </span>
            <div class="task-card__actions">
                <select
                    class="task-card__status"
                    aria-label="Task status"
                    on:change=move |ev| {
                        if let Ok(status) = event_target_value(&ev).parse::<TaskStatus>() {
                            if status != current {
                                on_status.run((id, status));
                            }
                        }
                    }
                >
                    {TaskStatus::ALL
                        .into_iter()
                        .map(|status| {
                            view! {
                                <option value=status.as_str() selected=status == current>
                                    {status.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button
                    class="task-card__delete"
                    title="Delete task"
                    aria-label="Delete task"
                    on:click=move |_| on_delete.run(id)
                >
                    "✕"
                </button>
            </div>
        </article>
    }
}
