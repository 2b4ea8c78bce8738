//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three URL paths exist. Every one renders inside the `Layout` shell; the
//! index route leaves the content slot empty. `AppRoute` mirrors the router
//! tree as plain data so navigation and link rendering share one table.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::layout::Layout;
use crate::pages::{sprints::SprintsPage, tasks::TasksPage};
use crate::state::query::QueryClient;
use crate::state::sprints::SprintsState;
use crate::state::tasks::TasksState;
use crate::state::users::UsersState;

/// A client-side route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Sprints,
    Tasks,
}

impl AppRoute {
    /// Routes in navigation order.
    pub const ALL: [Self; 3] = [Self::Home, Self::Sprints, Self::Tasks];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Sprints => "/sprints",
            Self::Tasks => "/tasks",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Sprints => "Sprints",
            Self::Tasks => "Tasks",
        }
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the query cache and page state contexts and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let query = RwSignal::new(QueryClient::default());
    let tasks = RwSignal::new(TasksState::default());
    let sprints = RwSignal::new(SprintsState::default());
    let users = RwSignal::new(UsersState::default());

    provide_context(query);
    provide_context(tasks);
    provide_context(sprints);
    provide_context(users);

    view! {
        <Stylesheet id="leptos" href="/pkg/sprintspace.css"/>
        <Title text="SprintSpace"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <ParentRoute path=StaticSegment("") view=Layout>
                    <Route path=StaticSegment("") view=|| ()/>
                    <Route path=StaticSegment("sprints") view=SprintsPage/>
                    <Route path=StaticSegment("tasks") view=TasksPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
