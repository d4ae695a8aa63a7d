//! REST API client module for the GateReady service.
//!
//! `ApiClient` covers the auth endpoints (`/login`, `/refresh`, `/logout`)
//! and the protected resources (`/bookings`, `/chat`). Protected requests
//! carry a `Bearer` access token and recover from expiry via the
//! refresh-and-retry-once protocol in [`dispatch`].

pub mod client;
pub mod dispatch;
pub mod error;

pub use client::{ApiClient, RefreshOutcome};
pub use error::ApiError;
