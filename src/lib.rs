//! Terminal client for the GateReady flight assistant.
//!
//! The engineering core is the authenticated session: a bearer token pair
//! (access + refresh) persisted across restarts, request dispatch that
//! recovers transparently from an expired access token by refreshing once
//! and retrying, and unconditional logout teardown. See [`api::dispatch`]
//! for the retry protocol and [`auth`] for session persistence.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod models;
