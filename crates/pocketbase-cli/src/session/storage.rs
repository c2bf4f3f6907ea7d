//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use pocketbase::{AuthStore, AuthToken, BaseUrl, PocketBase, Principal, Record};
use serde::{Deserialize, Serialize};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Serialize, Deserialize)]
pub struct StoredSession {
    pub url: BaseUrl,
    token: String,
    pub record: Record,
    pub principal: Principal,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    /// True if this session was issued by the given server.
    pub fn is_for(&self, base: &BaseUrl) -> bool {
        &self.url == base
    }

    /// Load the credentials into an auth store.
    pub fn restore(self, auth: &AuthStore) {
        auth.set(AuthToken::new(self.token), self.record, self.principal);
    }
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "pb").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save the client's current credentials to disk.
pub fn save_session(client: &PocketBase) -> Result<()> {
    let snapshot = client
        .auth_store()
        .snapshot()
        .context("Client holds no credentials")?;

    let stored = StoredSession {
        url: client.base_url().clone(),
        token: snapshot.token().as_str().to_string(),
        record: snapshot.record().clone(),
        principal: snapshot.principal().clone(),
        saved_at: Utc::now(),
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load the stored session, if there is one.
pub fn load_session() -> Result<Option<StoredSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}

/// Remove the stored session. Returns false if there was none.
pub fn clear_session() -> Result<bool> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path).context("Failed to remove session file")?;
    Ok(true)
}
