//! Signed-in identity that survives restarts.
//!
//! A `SessionContext` is either anonymous or holds an [`Identity`]. Logging in
//! writes the identity to its [`SessionStorage`]; logging out clears it. An
//! expired token is not detected here: the server rejects the next
//! authenticated call and the caller sees that error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FeedClientResult;
use crate::models::AuthResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The persisted record of a signed-in user.
pub struct Identity {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Bearer token.
    pub token: String,
}

impl From<AuthResponse> for Identity {
    fn from(value: AuthResponse) -> Self {
        Self {
            id: value.user.id,
            username: value.user.username,
            token: value.token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Current state of a session.
pub enum SessionState {
    /// Nobody is signed in.
    Anonymous,
    /// A user is signed in.
    Authenticated(Identity),
}

/// Where the serialized identity lives.
pub trait SessionStorage {
    /// Returns the raw record, or `None` if nothing is stored. The bytes are not
    /// validated here; [`SessionContext::restore`] discards anything unreadable.
    fn load(&self) -> FeedClientResult<Option<Vec<u8>>>;
    /// Replaces the stored record.
    fn store(&self, raw: &[u8]) -> FeedClientResult<()>;
    /// Removes the stored record. Removing a missing record is not an error.
    fn clear(&self) -> FeedClientResult<()>;
}

#[derive(Debug, Clone)]
/// Keeps the record as JSON in a single file.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Uses the file at `path`. The file is created on first login.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> FeedClientResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, raw: &[u8]) -> FeedClientResult<()> {
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> FeedClientResult<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug)]
/// Session state bound to its storage.
pub struct SessionContext<S: SessionStorage> {
    storage: S,
    state: SessionState,
}

impl<S: SessionStorage> SessionContext<S> {
    /// Restores the session from `storage`.
    ///
    /// A record that does not parse is removed and the session starts anonymous.
    pub fn restore(storage: S) -> FeedClientResult<Self> {
        let state = match storage.load()? {
            None => SessionState::Anonymous,
            Some(raw) => match serde_json::from_slice::<Identity>(&raw) {
                Ok(identity) => SessionState::Authenticated(identity),
                Err(_) => {
                    storage.clear()?;
                    SessionState::Anonymous
                }
            },
        };

        Ok(Self { storage, state })
    }

    /// Persists `identity` and switches to `Authenticated`.
    pub fn login(&mut self, identity: Identity) -> FeedClientResult<()> {
        let raw = serde_json::to_vec(&identity).map_err(std::io::Error::from)?;
        self.storage.store(&raw)?;
        self.state = SessionState::Authenticated(identity);
        Ok(())
    }

    /// Clears storage and switches to `Anonymous`.
    pub fn logout(&mut self) -> FeedClientResult<()> {
        self.storage.clear()?;
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Anonymous => None,
        }
    }

    /// Token of the signed-in identity, if any.
    pub fn token(&self) -> Option<&str> {
        self.identity().map(|identity| identity.token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn storage(dir: &TempDir) -> FileSessionStorage {
        FileSessionStorage::new(dir.path().join("session.json"))
    }

    fn alice() -> Identity {
        Identity {
            id: 1,
            username: "alice".to_string(),
            token: "t0k3n".to_string(),
        }
    }

    #[test]
    fn starts_anonymous_without_record() {
        let dir = TempDir::new().expect("tempdir");
        let session = SessionContext::restore(storage(&dir)).expect("restore");

        assert_eq!(session.state(), &SessionState::Anonymous);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn login_persists_identity_for_next_restore() {
        let dir = TempDir::new().expect("tempdir");
        let mut session = SessionContext::restore(storage(&dir)).expect("restore");
        session.login(alice()).expect("login");
        assert_eq!(session.token(), Some("t0k3n"));

        let restored = SessionContext::restore(storage(&dir)).expect("restore");
        assert_eq!(restored.identity(), Some(&alice()));
    }

    #[test]
    fn logout_clears_storage() {
        let dir = TempDir::new().expect("tempdir");
        let mut session = SessionContext::restore(storage(&dir)).expect("restore");
        session.login(alice()).expect("login");
        session.logout().expect("logout");

        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(!storage(&dir).path().exists());

        // Second logout on an empty store is fine.
        session.logout().expect("logout again");
    }

    #[test]
    fn non_utf8_record_is_discarded() {
        let dir = TempDir::new().expect("tempdir");
        let storage = storage(&dir);
        fs::write(storage.path(), [0xff, 0xfe, 0x7b]).expect("write");

        let mut session = SessionContext::restore(storage.clone()).expect("restore");

        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(!storage.path().exists());
        session.logout().expect("logout");
    }

    #[test]
    fn corrupted_record_is_discarded() {
        let dir = TempDir::new().expect("tempdir");
        let storage = storage(&dir);
        fs::write(storage.path(), "{not json").expect("write");

        let session = SessionContext::restore(storage.clone()).expect("restore");

        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(!storage.path().exists());
    }
}
