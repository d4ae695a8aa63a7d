//! Durable storage for the bearer token pair.
//!
//! Tokens are kept in a single JSON file so both fields always hit disk in
//! one write. Storage is assumed available: a failing read degrades to the
//! empty (signed-out) pair and a failing write means the user logs in again
//! next launch. Neither surfaces an error to callers.

use std::path::PathBuf;

use tracing::warn;

use super::TokenPair;

/// Token file name in the cache directory
const TOKENS_FILE: &str = "tokens.json";

/// File-backed persistence for the current [`TokenPair`].
///
/// `load` never fails; absent or unreadable state is the empty pair.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            path: cache_dir.join(TOKENS_FILE),
        }
    }

    /// Read the stored pair, or the empty pair if nothing usable is on disk.
    pub fn load(&self) -> TokenPair {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return TokenPair::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unparseable token file");
                TokenPair::default()
            }
        }
    }

    /// Overwrite both stored tokens unconditionally.
    pub fn save(&self, pair: &TokenPair) {
        if let Err(e) = self.try_save(pair) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist tokens");
        }
    }

    /// Remove the stored pair entirely.
    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "Failed to remove token file");
            }
        }
    }

    fn try_save(&self, pair: &TokenPair) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(pair)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().to_path_buf())
    }

    #[test]
    fn load_after_save_returns_same_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let pair = TokenPair {
            access_token: "access-abc".to_string(),
            refresh_token: "refresh-xyz".to_string(),
        };
        store.save(&pair);
        assert_eq!(store.load(), pair);
    }

    #[test]
    fn load_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let pair = store.load();
        assert!(pair.access_token.is_empty());
        assert!(pair.refresh_token.is_empty());
    }

    #[test]
    fn load_with_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOKENS_FILE), "not json").unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load(), TokenPair::default());
    }

    #[test]
    fn clear_removes_stored_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        });
        store.clear();
        assert_eq!(store.load(), TokenPair::default());
    }

    #[test]
    fn save_overwrites_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&TokenPair {
            access_token: "old-access".to_string(),
            refresh_token: "old-refresh".to_string(),
        });
        let newer = TokenPair {
            access_token: "new-access".to_string(),
            refresh_token: "new-refresh".to_string(),
        };
        store.save(&newer);
        assert_eq!(store.load(), newer);
    }
}
