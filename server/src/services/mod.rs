//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own workspace mutations and persistence concerns so route
//! handlers can stay focused on protocol translation.

pub mod persistence;
pub mod seed;
pub mod sprint;
pub mod task;
pub mod user;
