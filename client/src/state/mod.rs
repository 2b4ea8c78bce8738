//! Reactive client state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` wraps each struct here in an `RwSignal` and provides it. Pages read
//! them with `expect_context` and update them as fetches resolve.

pub mod query;
pub mod sprints;
pub mod tasks;
pub mod users;
