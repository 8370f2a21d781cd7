//! The durable session-token slot.
//!
//! One file, one value: the opaque session token proving an authenticated
//! identity to the remote API. It survives restarts and is removed on
//! logout. The slot is re-read on every outgoing call rather than cached,
//! so a token acquired elsewhere in the same context is picked up.

use std::io;
use std::path::PathBuf;

use crate::error::BrontoResult;

const TOKEN_FILE: &str = "sessionId";

/// Handle to the durable token slot.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// The slot under the platform data directory
    /// (e.g. `~/.local/share/brontoboard/sessionId`).
    pub fn default_path() -> BrontoResult<Self> {
        let dir = dirs::data_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine data directory")
        })?;

        Ok(Self::at(dir.join("brontoboard")))
    }

    /// The slot inside the given directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        SessionStore {
            path: dir.into().join(TOKEN_FILE),
        }
    }

    /// Read the stored token, if any.
    pub fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();

        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Store the token, creating the directory if needed.
    pub fn save(&self, token: &str) -> BrontoResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, token)?;

        // Set to owner-only (0600) since the file holds a live credential:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Remove the token. Clearing an already-empty slot succeeds.
    pub fn clear(&self) -> BrontoResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path());

        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("nested"));

        store.save("token-123").unwrap();
        assert_eq!(store.load(), Some("token-123".to_string()));
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path());

        store.save("token-123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);

        // Clearing again is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_whitespace_only_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path());

        store.save("  \n").unwrap();
        assert_eq!(store.load(), None);
    }
}
