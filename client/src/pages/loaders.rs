//! Cache-aware collection loaders shared by the pages.
//!
//! Each loader consults the `QueryClient`, starts at most one fetch per key,
//! and writes the outcome into the matching page state. Outside the browser
//! they do nothing; SSR renders the empty state and hydration fills it in.

use leptos::prelude::*;

use crate::state::query::QueryClient;
#[cfg(feature = "hydrate")]
use crate::state::query::QueryKey;
use crate::state::sprints::SprintsState;
use crate::state::tasks::TasksState;
use crate::state::users::UsersState;

/// Start a fetch for `key` unless the cache says the data is still usable.
///
/// `on_start` runs synchronously when a fetch begins; `on_done` receives the
/// final result after retries.
#[cfg(feature = "hydrate")]
fn spawn_query<T, F, Fut>(
    query: RwSignal<QueryClient>,
    key: QueryKey,
    fetch: F,
    on_start: impl FnOnce(),
    on_done: impl FnOnce(Result<T, String>) + 'static,
) where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: std::future::Future<Output = Result<T, String>> + 'static,
{
    let now = crate::util::clock::now_ms();
    let start = query
        .try_update(|q| {
            q.collect_garbage(now);
            if !q.should_fetch(key, now) {
                return false;
            }
            q.begin_fetch(key, now);
            true
        })
        .unwrap_or(false);
    if !start {
        return;
    }
    on_start();
    leptos::task::spawn_local(async move {
        let result = crate::state::query::run_query(query, key, fetch).await;
        on_done(result);
    });
}

pub(crate) fn load_tasks(query: RwSignal<QueryClient>, tasks: RwSignal<TasksState>) {
    #[cfg(feature = "hydrate")]
    spawn_query(
        query,
        QueryKey::Tasks,
        crate::net::api::fetch_tasks,
        move || {
            tasks.update(|s| {
                s.loading = true;
                s.error = None;
            });
        },
        move |result| {
            tasks.update(|s| {
                s.loading = false;
                match result {
                    Ok(items) => s.items = items,
                    Err(e) => s.error = Some(e),
                }
            });
        },
    );
    #[cfg(not(feature = "hydrate"))]
    let _ = (query, tasks);
}

pub(crate) fn load_sprints(query: RwSignal<QueryClient>, sprints: RwSignal<SprintsState>) {
    #[cfg(feature = "hydrate")]
    {
        spawn_query(
            query,
            QueryKey::Sprints,
            crate::net::api::fetch_sprints,
            move || {
                sprints.update(|s| {
                    s.loading = true;
                    s.error = None;
                });
            },
            move |result| {
                sprints.update(|s| {
                    s.loading = false;
                    match result {
                        Ok(items) => s.items = items,
                        Err(e) => s.error = Some(e),
                    }
                });
            },
        );
        spawn_query(
            query,
            QueryKey::CurrentSprint,
            crate::net::api::fetch_current_sprint,
            || {},
            move |result| match result {
                Ok(current) => sprints.update(|s| s.current_sprint_id = current.map(|sprint| sprint.id)),
                Err(e) => sprints.update(|s| s.error = Some(e)),
            },
        );
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (query, sprints);
}

pub(crate) fn load_users(query: RwSignal<QueryClient>, users: RwSignal<UsersState>) {
    #[cfg(feature = "hydrate")]
    spawn_query(
        query,
        QueryKey::Users,
        crate::net::api::fetch_users,
        move || users.update(|s| s.loading = true),
        move |result| {
            users.update(|s| {
                s.loading = false;
                match result {
                    Ok(items) => s.items = items,
                    Err(e) => s.error = Some(e),
                }
            });
        },
    );
    #[cfg(not(feature = "hydrate"))]
    let _ = (query, users);
}

/// Mark `keys` stale after a successful write.
#[cfg(feature = "hydrate")]
pub(crate) fn invalidate(query: RwSignal<QueryClient>, keys: &[QueryKey]) {
    query.update(|q| {
        for key in keys {
            q.invalidate(*key);
        }
    });
}
