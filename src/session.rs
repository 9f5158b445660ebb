//! Session Management
//!
//! Holds the bearer token in memory and mirrors it to a durable token file,
//! the CLI equivalent of the browser's stored credential. The token file is
//! plain text: one key, removed on sign-out.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

const TOKEN_FILE_NAME: &str = "token";

/// Errors from reading or writing the durable token file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No config directory available for storing the session token")]
    NoConfigDir,

    #[error("Failed to write token file {path:?}: {error}")]
    Store { path: PathBuf, error: String },

    #[error("Failed to remove token file {path:?}: {error}")]
    Delete { path: PathBuf, error: String },
}

/// Durable storage for the bearer token: one plain-text file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config_dir>/novarch-admin/token`.
    pub fn default_path() -> Result<PathBuf, SessionError> {
        dirs::config_dir()
            .map(|dir| dir.join("novarch-admin").join(TOKEN_FILE_NAME))
            .ok_or(SessionError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token, if any. Blank files count as absent.
    pub fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn store(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::Store {
                path: parent.to_path_buf(),
                error: e.to_string(),
            })?;
        }
        fs::write(&self.path, token).map_err(|e| SessionError::Store {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        // Token is a credential; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)) {
                tracing::warn!("failed to chmod 0600 {}: {e}", self.path.display());
            }
        }

        Ok(())
    }

    pub fn delete(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| SessionError::Delete {
                path: self.path.clone(),
                error: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// The current sign-in state: token in memory, mirrored to the store.
///
/// A 401 from the backend does not clear this session; only an explicit
/// sign-out does. That mirrors the backend admin surface this client pairs
/// with.
#[derive(Debug)]
pub struct Session {
    token: Option<String>,
    store: TokenStore,
}

impl Session {
    /// Initialize from durable storage. A stored token makes the
    /// authenticated commands reachable.
    pub fn load(store: TokenStore) -> Self {
        let token = store.load();
        if token.is_some() {
            tracing::debug!("restored session token from {}", store.path().display());
        }
        Self { token, store }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// Store a freshly issued token in memory and on disk.
    pub fn sign_in(&mut self, token: String) -> Result<(), SessionError> {
        self.store.store(&token)?;
        self.token = Some(token);
        Ok(())
    }

    /// Drop the token from memory and remove the durable copy.
    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.token = None;
        self.store.delete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, TokenStore) {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::new(tmp.path().join("token"));
        (tmp, store)
    }

    #[test]
    fn load_without_stored_token_is_signed_out() {
        let (_tmp, store) = temp_store();
        let session = Session::load(store);
        assert!(!session.is_signed_in());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn sign_in_persists_and_reloads() {
        let (_tmp, store) = temp_store();

        let mut session = Session::load(store.clone());
        session.sign_in("abc123".into()).expect("sign in");
        assert_eq!(session.token(), Some("abc123"));

        let restored = Session::load(store);
        assert_eq!(restored.token(), Some("abc123"));
    }

    #[test]
    fn sign_out_removes_token_file() {
        let (_tmp, store) = temp_store();

        let mut session = Session::load(store.clone());
        session.sign_in("abc123".into()).expect("sign in");
        session.sign_out().expect("sign out");

        assert!(!session.is_signed_in());
        assert!(!store.path().exists());
        assert!(!Session::load(store).is_signed_in());
    }

    #[test]
    fn sign_out_without_token_file_is_ok() {
        let (_tmp, store) = temp_store();
        let mut session = Session::load(store);
        session.sign_out().expect("nothing to remove");
    }

    #[test]
    fn blank_token_file_counts_as_absent() {
        let (_tmp, store) = temp_store();
        std::fs::write(store.path(), "  \n").expect("write");
        assert_eq!(store.load(), None);
    }

    #[cfg(unix)]
    #[test]
    fn stored_token_is_owner_readable_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, store) = temp_store();
        store.store("abc123").expect("store");

        let mode = std::fs::metadata(store.path())
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600);
    }
}
