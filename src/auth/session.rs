//! In-memory session state backed by the credential store.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::CredentialStore;

/// The access/refresh bearer pair. Both fields empty means signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// The process's single session: the current token pair plus its backing
/// store. Sole writer of [`CredentialStore`]: every mutation goes through
/// [`replace`](Self::replace), which persists synchronously.
///
/// Shared across tasks behind an `Arc`. Reads clone the pair out; writes are
/// full replacements, so racing refreshes converge on whichever finished last.
pub struct SessionState {
    store: CredentialStore,
    tokens: RwLock<TokenPair>,
}

impl SessionState {
    /// Hydrate from durable storage. Called once at startup.
    pub fn new(store: CredentialStore) -> Self {
        let tokens = store.load();
        Self {
            store,
            tokens: RwLock::new(tokens),
        }
    }

    /// Snapshot of the current pair.
    pub fn current(&self) -> TokenPair {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        !self
            .tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .is_empty()
    }

    /// Replace both tokens and persist the new pair. Passing two empty
    /// strings is the logout teardown. There is no partial update: a caller
    /// retaining the old refresh token passes it through explicitly.
    pub fn replace(&self, access_token: &str, refresh_token: &str) {
        let pair = TokenPair::new(access_token, refresh_token);
        {
            let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
            *tokens = pair.clone();
        }
        if pair.access_token.is_empty() && pair.refresh_token.is_empty() {
            self.store.clear();
        } else {
            self.store.save(&pair);
        }
    }
}
