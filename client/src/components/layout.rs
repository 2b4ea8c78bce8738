//! Persistent application chrome: header navigation, content slot, footer.
//!
//! DESIGN
//! ======
//! The nav set is fixed and independent of the current route. Link targets
//! come from `AppRoute::ALL` so the header never drifts from the router.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};

use crate::app::AppRoute;

/// Footer caption shown on every page.
pub const FOOTER_TEXT: &str = "SprintSpace - Development Version";

/// One header navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Header navigation, in display order.
pub const NAV_LINKS: [NavLink; 3] = nav_links();

const fn nav_links() -> [NavLink; 3] {
    let routes = AppRoute::ALL;
    [nav_link(routes[0]), nav_link(routes[1]), nav_link(routes[2])]
}

const fn nav_link(route: AppRoute) -> NavLink {
    NavLink { label: route.label(), href: route.path() }
}

/// Layout wrapping every route. Nested routes render into the `<main>` slot.
#[component]
pub fn Layout() -> impl IntoView {
    view! {
        <div class="layout">
            <header class="layout__header">
                <span class="layout__brand">"SprintSpace"</span>
                <nav class="layout__nav">
                    {NAV_LINKS
                        .iter()
                        .map(|link| view! { <A href=link.href>{link.label}</A> })
                        .collect_view()}
                </nav>
            </header>
            <main class="layout__content">
                <Outlet/>
            </main>
            <footer class="layout__footer">{FOOTER_TEXT}</footer>
        </div>
    }
}
