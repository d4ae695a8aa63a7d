//! The refresh-and-retry-once protocol for protected requests.
//!
//! Every protected call flows through [`ApiClient::dispatch`]:
//!
//! 1. Send with the current access token. Any status other than 401 is the
//!    final outcome.
//! 2. On 401 only: exchange the refresh token for a new pair, persist it,
//!    and re-send once with the freshly stored access token.
//! 3. A skipped refresh (no token), a rejected refresh, or a second 401 all
//!    terminate as [`ApiError::Unauthenticated`].
//!
//! Refresh runs at most once per logical call, so a stale or revoked refresh
//! token can never loop. Concurrent calls that each hit a 401 refresh
//! independently; the last `replace` wins and every successful result is a
//! valid pair.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use super::client::RefreshOutcome;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Send an authenticated request, transparently recovering once from an
    /// expired access token. `build` is invoked once per attempt so the
    /// retry picks up the token stored by the refresh.
    pub(super) async fn dispatch<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client, &str) -> RequestBuilder,
    {
        let pair = self.session.current();

        // Attempt 1: current access token.
        let response = build(&self.client, &pair.access_token).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // 401 is the sole trigger for the refresh branch. Without a refresh
        // token there is nothing to exchange.
        if pair.refresh_token.is_empty() {
            debug!("Unauthorized with no refresh token; sign-in required");
            return Err(ApiError::Unauthenticated);
        }

        match self.refresh(&pair.refresh_token).await? {
            RefreshOutcome::Rejected => {
                debug!("Refresh token rejected; sign-in required");
                Err(ApiError::Unauthenticated)
            }
            RefreshOutcome::Rotated(new_pair) => {
                // Persist before the retry so this attempt and any later
                // caller observe the new pair.
                self.session
                    .replace(&new_pair.access_token, &new_pair.refresh_token);
                debug!("Access token refreshed, retrying request");

                // Attempt 2: freshly stored token, no further retry.
                let access = self.session.current().access_token;
                let retry = build(&self.client, &access).send().await?;
                if retry.status() == StatusCode::UNAUTHORIZED {
                    return Err(ApiError::Unauthenticated);
                }
                Ok(retry)
            }
        }
    }
}
