//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the application chrome and list cards while reading
//! shared state from Leptos context providers.

pub mod layout;
pub mod sprint_card;
pub mod task_card;
