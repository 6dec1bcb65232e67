// docvault-client/src/session.rs
// Session storage - `{user, token}` as a JSON file

use serde::{Deserialize, Serialize};
use shared::models::{AuthResponse, Role, UserInfo};
use std::fs;
use std::path::{Path, PathBuf};

/// Logged-in user and the token issued at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserInfo,
    pub token: String,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            user: resp.user,
            token: resp.token,
        }
    }
}

/// Session file store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// A missing or unreadable file means "not logged in"
    pub fn load(&self) -> Option<Session> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    /// Logout; removing an absent file is not an error
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
