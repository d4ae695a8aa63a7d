//! Session and credential management.
//!
//! This module provides:
//! - `CredentialStore`: durable file-backed storage for the token pair
//! - `SessionState`: the in-memory session, sole writer of the store
//!
//! The pair survives restarts; expiry is only ever discovered when the server
//! rejects a request, never inspected locally.

pub mod session;
pub mod store;

pub use session::{SessionState, TokenPair};
pub use store::CredentialStore;
