//! API client for communicating with the GateReady REST API.
//!
//! This module provides the `ApiClient` struct for the two privileged token
//! exchanges (login, refresh), best-effort logout revocation, and the
//! protected booking and chat endpoints. Protected calls go through the
//! dispatch protocol in [`super::dispatch`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::auth::{SessionState, TokenPair};
use crate::models::{Booking, BookingFilter};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow chat-graph responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// The refresh endpoint may rotate the refresh token or omit it.
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    reply: String,
}

/// Result of a refresh exchange. Rejection is an expected, recoverable
/// outcome; the dispatch protocol absorbs it into its unauthenticated
/// terminal state rather than surfacing it as an error.
#[derive(Debug)]
pub enum RefreshOutcome {
    Rotated(TokenPair),
    Rejected,
}

/// API client for GateReady.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    pub(super) client: Client,
    pub(super) base_url: String,
    pub(super) session: Arc<SessionState>,
}

impl ApiClient {
    /// Create a new API client against `base_url`, attached to the session
    /// it reads tokens from (and refreshes into).
    pub fn new(base_url: impl Into<String>, session: Arc<SessionState>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // ===== Token exchanges =====

    /// Exchange username/password for a fresh token pair. Does not touch the
    /// session; the caller applies the result.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let url = format!("{}/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Login rejected");
            return Err(ApiError::InvalidCredentials);
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("login response: {e}")))?;
        Ok(TokenPair::new(
            body.access_token,
            body.refresh_token.unwrap_or_default(),
        ))
    }

    /// Exchange the refresh token for a new pair. An empty or rejected
    /// refresh token yields `Rejected`; only transport failures are errors.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, ApiError> {
        if refresh_token.is_empty() {
            return Ok(RefreshOutcome::Rejected);
        }

        let url = format!("{}/refresh", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Refresh token rejected");
            return Ok(RefreshOutcome::Rejected);
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("refresh response: {e}")))?;

        // The server may omit a rotated refresh token; retain the one we sent.
        let refresh = body
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| refresh_token.to_string());
        Ok(RefreshOutcome::Rotated(TokenPair::new(
            body.access_token,
            refresh,
        )))
    }

    /// Notify the server to revoke the refresh token. Best-effort: skipped
    /// when the token is empty, and any failure is swallowed so local
    /// teardown always proceeds.
    pub async fn logout(&self, refresh_token: &str) {
        if refresh_token.is_empty() {
            return;
        }

        let url = format!("{}/logout", self.base_url);
        let result = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await;

        match result {
            Ok(response) => debug!(status = %response.status(), "Logout notification sent"),
            Err(e) => debug!(error = %e, "Logout notification failed"),
        }
    }

    // ===== Protected endpoints =====

    /// Fetch the caller's bookings, optionally narrowed by origin,
    /// destination, and status. No matches is an empty list, never an error.
    pub async fn fetch_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, ApiError> {
        let url = format!("{}/bookings", self.base_url);
        let response = self
            .dispatch(|client, token| {
                let mut request = client.get(&url).bearer_auth(token);
                if let Some(ref origin) = filter.origin {
                    request = request.query(&[("origin", origin)]);
                }
                if let Some(ref destination) = filter.destination {
                    request = request.query(&[("destination", destination)]);
                }
                if let Some(ref status) = filter.status {
                    request = request.query(&[("status", status)]);
                }
                request
            })
            .await?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("bookings response: {e}")))
    }

    /// Send one chat message and return the assistant's reply.
    pub async fn send_chat(&self, message: &str) -> Result<String, ApiError> {
        let url = format!("{}/chat", self.base_url);
        let body = serde_json::json!({ "message": message });
        let response = self
            .dispatch(|client, token| client.post(&url).bearer_auth(token).json(&body))
            .await?;

        let response = Self::check_response(response).await?;
        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("chat response: {e}")))?;
        Ok(chat.reply)
    }

    /// Check if a terminal response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}
