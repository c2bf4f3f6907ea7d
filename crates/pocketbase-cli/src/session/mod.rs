//! Persisted login state and client construction.

pub mod storage;

use anyhow::{Context, Result};
use pocketbase::{AuthStore, BaseUrl, PocketBase};
use tracing::debug;

pub use storage::StoredSession;

/// Server used when neither `--url` nor a stored session names one.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8090";

/// Build a client for the resolved server.
///
/// The URL comes from `--url`/`POCKETBASE_URL`, else the stored session,
/// else [`DEFAULT_URL`]. The stored credentials are restored only when they
/// belong to that same server. They are not refreshed.
pub fn client(url: Option<&str>) -> Result<PocketBase> {
    let stored = storage::load_session().context("Failed to load session")?;

    let base: BaseUrl = match (url, &stored) {
        (Some(url), _) => url.parse().context("Invalid server URL")?,
        (None, Some(stored)) => stored.url.clone(),
        (None, None) => DEFAULT_URL.parse().context("Invalid server URL")?,
    };

    let auth = AuthStore::new();
    if let Some(stored) = stored {
        if stored.is_for(&base) {
            stored.restore(&auth);
        } else {
            debug!(session = %stored.url, server = %base, "Stored session is for another server");
        }
    }

    PocketBase::builder()
        .base_url(base.as_str())
        .user_agent(format!("pb/{}", env!("PB_VERSION")))
        .auth_store(auth)
        .build()
        .context("Failed to configure client")
}

/// Build a client that must carry restored credentials.
pub fn authenticated_client(url: Option<&str>) -> Result<PocketBase> {
    let client = client(url)?;
    if !client.auth_store().is_valid() {
        anyhow::bail!("No active session for {}. Run 'pb auth login' first.", client.base_url());
    }
    Ok(client)
}
