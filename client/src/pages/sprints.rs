//! Sprints page: list, create, delete, and pick the current sprint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered under `/sprints` inside the layout shell. Dates are entered as
//! calendar days and sent as UTC midnight timestamps.

#[cfg(test)]
#[path = "sprints_test.rs"]
mod sprints_test;

use leptos::prelude::*;
use model::{NewSprint, SprintStatus};
use uuid::Uuid;

#[cfg(feature = "hydrate")]
use super::loaders::invalidate;
use super::loaders::load_sprints;
use crate::components::sprint_card::SprintCard;
#[cfg(feature = "hydrate")]
use crate::state::query::QueryKey;
use crate::state::query::QueryClient;
use crate::state::sprints::SprintsState;
use crate::util::dates::parse_day;

/// Build a create-sprint body from raw form input.
pub fn validate_new_sprint_input(name: &str, start: &str, end: &str) -> Result<NewSprint, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Sprint name is required.");
    }
    let start_date = parse_day(start).ok_or("Start date must be YYYY-MM-DD.")?;
    let end_date = parse_day(end).ok_or("End date must be YYYY-MM-DD.")?;
    Ok(NewSprint { name: name.to_owned(), start_date, end_date, status: SprintStatus::Planned })
}

#[component]
pub fn SprintsPage() -> impl IntoView {
    let query = expect_context::<RwSignal<QueryClient>>();
    let sprints = expect_context::<RwSignal<SprintsState>>();

    Effect::new(move || load_sprints(query, sprints));

    let name = RwSignal::new(String::new());
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let body = match validate_new_sprint_input(&name.get_untracked(), &start.get_untracked(), &end.get_untracked())
        {
            Ok(body) => body,
            Err(message) => {
                form_error.set(Some(message.to_owned()));
                return;
            }
        };
        form_error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_sprint(&body).await {
                Ok(sprint) => {
                    sprints.update(|s| s.insert_sorted(sprint));
                    name.set(String::new());
                    start.set(String::new());
                    end.set(String::new());
                    invalidate(query, &[QueryKey::Sprints]);
                }
                Err(e) => form_error.set(Some(e)),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = body;
    };

    let on_toggle_current = Callback::new(move |sprint_id: Uuid| {
        let target = if sprints.with_untracked(|s| s.is_current(sprint_id)) { None } else { Some(sprint_id) };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::set_current_sprint(target).await {
                Ok(current) => {
                    sprints.update(|s| s.current_sprint_id = current.map(|sprint| sprint.id));
                    invalidate(query, &[QueryKey::CurrentSprint]);
                }
                Err(e) => sprints.update(|s| s.error = Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = target;
    });

    let on_delete = Callback::new(move |sprint_id: Uuid| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_sprint(sprint_id).await {
                Ok(()) => {
                    sprints.update(|s| s.remove(sprint_id));
                    invalidate(query, &[QueryKey::Sprints, QueryKey::Tasks, QueryKey::CurrentSprint]);
                }
                Err(e) => sprints.update(|s| s.error = Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = sprint_id;
    });

    view! {
        <section class="page sprints-page">
            <h1 class="page__title">"Sprints"</h1>
            <p class="sprints-page__current">
                {move || {
                    sprints.with(|s| match s.current() {
                        Some(sprint) => format!("Current sprint: {}", sprint.name),
                        None => "No current sprint.".to_owned(),
                    })
                }}
            </p>

            <form class="sprint-form" on:submit=on_create>
                <input
                    class="sprint-form__name"
                    type="text"
                    placeholder="Sprint name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <label class="sprint-form__date">
                    "Start "
                    <input
                        type="date"
                        prop:value=move || start.get()
                        on:input=move |ev| start.set(event_target_value(&ev))
                    />
                </label>
                <label class="sprint-form__date">
                    "End "
                    <input
                        type="date"
                        prop:value=move || end.get()
                        on:input=move |ev| end.set(event_target_value(&ev))
                    />
                </label>
                <button class="sprint-form__submit" type="submit" disabled=move || busy.get()>
                    "Create sprint"
                </button>
            </form>
            {move || form_error.get().map(|e| view! { <p class="page__error">{e}</p> })}

            <Show when=move || sprints.with(|s| s.loading)>
                <p class="page__loading">"Loading sprints..."</p>
            </Show>
            {move || sprints.with(|s| s.error.clone()).map(|e| view! { <p class="page__error">{e}</p> })}
            <Show when=move || sprints.with(|s| !s.loading && s.error.is_none() && s.items.is_empty())>
                <p class="page__empty">"No sprints yet."</p>
            </Show>

            <div class="sprint-list">
                {move || {
                    sprints
                        .get()
                        .items
                        .into_iter()
                        .map(|sprint| {
                            let is_current = sprints.with_untracked(|s| s.is_current(sprint.id));
                            view! {
                                <SprintCard
                                    sprint=sprint
                                    is_current=is_current
                                    on_toggle_current=on_toggle_current
                                    on_delete=on_delete
                                />
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
