//! Networking modules for the JSON API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every REST endpoint the pages use. Wire types come from the
//! shared `model` crate.

pub mod api;
