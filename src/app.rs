//! Application state and actions for the GateReady terminal client.
//!
//! `App` owns the chat transcript, the cached bookings list, and the active
//! filter, and wires user actions to the API client. Errors come in two
//! tiers: login and chat-send failures are returned to the caller for
//! display, while the background bookings refresh fails silently (stale or
//! empty data is shown instead).

use std::sync::Arc;

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::auth::SessionState;
use crate::config::Config;
use crate::models::{Booking, BookingFilter, Message};

pub struct App {
    api: ApiClient,
    session: Arc<SessionState>,
    config: Config,
    pub transcript: Vec<Message>,
    pub bookings: Vec<Booking>,
    pub filter: BookingFilter,
}

impl App {
    pub fn new(config: Config, session: Arc<SessionState>, api: ApiClient) -> Self {
        Self {
            api,
            session,
            config,
            transcript: Vec::new(),
            bookings: Vec::new(),
            filter: BookingFilter::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn last_username(&self) -> Option<&str> {
        self.config.last_username.as_deref()
    }

    /// Persist the config (last username). Non-fatal on failure.
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            debug!(error = %e, "Failed to save config");
        }
    }

    /// Sign in and store the resulting pair. A rejected attempt leaves the
    /// session untouched: a typo'd password during a re-login must not sign
    /// the user out of a still-valid session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        let pair = self.api.login(username, password).await?;
        self.session.replace(&pair.access_token, &pair.refresh_token);
        self.config.last_username = Some(username.to_string());
        self.refresh_bookings().await;
        Ok(())
    }

    /// Send one chat message. The user's message stays in the transcript
    /// even when the request fails, matching what was typed.
    pub async fn send_message(&mut self, text: &str) -> Result<String, ApiError> {
        let trimmed = text.trim();
        self.transcript.push(Message::user(trimmed));

        let reply = self.api.send_chat(trimmed).await?;
        self.transcript.push(Message::assistant(reply.clone()));

        // Bookings may have changed as a side effect of the conversation.
        self.refresh_bookings().await;
        Ok(reply)
    }

    /// Background-tier refresh of the bookings list. Failures are logged and
    /// swallowed; the user is never interrupted for this.
    pub async fn refresh_bookings(&mut self) {
        if !self.session.is_authenticated() {
            self.bookings.clear();
            return;
        }
        match self.api.fetch_bookings(&self.filter).await {
            Ok(bookings) => self.bookings = bookings,
            Err(e) => debug!(error = %e, "Background bookings refresh failed"),
        }
    }

    /// Tear the session down. Server-side revocation is best-effort; local
    /// state is cleared unconditionally.
    pub async fn logout(&mut self) {
        let refresh_token = self.session.current().refresh_token;
        self.api.logout(&refresh_token).await;

        self.session.replace("", "");
        self.transcript.clear();
        self.bookings.clear();
        self.filter = BookingFilter::default();
    }
}
