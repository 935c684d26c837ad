//! AuthStore - signed-in session, persisted across runs
//!
//! Stored as `<data_dir>/session.json`. Without a data directory the
//! session only lives in memory.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::client::{AuthSession, UserInfo};

use crate::ClientResult;

/// Persisted session file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    pub user: UserInfo,
    /// Unix millis
    pub logged_in_at: i64,
}

#[derive(Debug, Default)]
pub struct AuthStore {
    file_path: Option<PathBuf>,
    session: RwLock<Option<StoredSession>>,
}

impl AuthStore {
    /// In-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `file_path`; a missing file means signed out
    pub fn load(file_path: &Path) -> ClientResult<Self> {
        let session = if file_path.exists() {
            let content = std::fs::read_to_string(file_path)?;
            match serde_json::from_str::<StoredSession>(&content) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(path = %file_path.display(), error = %e, "Ignoring unreadable session file");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            file_path: Some(file_path.to_path_buf()),
            session: RwLock::new(session),
        })
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Store a fresh login and persist it
    pub fn set_session(&self, session: &AuthSession) -> ClientResult<()> {
        let stored = StoredSession {
            token: session.token.clone(),
            user: session.user.clone(),
            logged_in_at: shared::util::now_millis(),
        };
        self.save(&stored)?;
        *self.session.write() = Some(stored);
        tracing::debug!(user_id = session.user.id, "Session stored");
        Ok(())
    }

    /// Refresh the user after `/auth/me`
    pub fn set_user(&self, user: UserInfo) -> ClientResult<()> {
        let updated = {
            let mut guard = self.session.write();
            match guard.as_mut() {
                Some(session) => {
                    session.user = user;
                    Some(session.clone())
                }
                None => None,
            }
        };
        match updated {
            Some(session) => self.save(&session),
            None => Ok(()),
        }
    }

    /// Forget the session and delete the file
    pub fn clear(&self) -> ClientResult<()> {
        *self.session.write() = None;
        if let Some(path) = &self.file_path
            && path.exists()
        {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn session(&self) -> Option<StoredSession> {
        self.session.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.session.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .read()
            .as_ref()
            .is_some_and(|s| s.user.is_admin())
    }
}
