//! # client
//!
//! Leptos + WASM frontend for SprintSpace.
//!
//! This crate contains the route table, the layout shell, sprint and task
//! pages, page state, the query cache, and REST helpers. The server crate
//! renders it through `leptos_axum`; the browser hydrates it via [`hydrate`].

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and logger, then hydrate `<body>`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
