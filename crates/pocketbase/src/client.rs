//! The client entry point.

use std::time::Duration;

use tracing::debug;

use crate::auth::{AuthSnapshot, AuthStore};
use crate::error::{Error, StateError, ValidationError};
use crate::services::{self, AdminService, CollectionService, HealthService};
use crate::transport::HttpTransport;
use crate::types::BaseUrl;

/// A PocketBase API client.
///
/// Owns one transport and one [`AuthStore`]. Clones share both, as do all
/// service handles obtained from it, so a login through any handle is seen
/// by every other.
///
/// # Example
///
/// ```no_run
/// use pocketbase::{Credentials, PocketBase, QuerySpec};
///
/// # async fn example() -> Result<(), pocketbase::Error> {
/// let client = PocketBase::new("http://127.0.0.1:8090")?;
/// client
///     .collection("users")
///     .auth_with_password(&Credentials::new("user@example.com", "secret"))
///     .await?;
///
/// let posts = client
///     .collection("posts")
///     .get_list(&QuerySpec::new().with_filter("published = true"))
///     .await?;
/// println!("{} of {} posts", posts.items.len(), posts.total_items);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PocketBase {
    transport: HttpTransport,
}

impl PocketBase {
    /// Create a client with default settings.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the server URL.
    pub fn base_url(&self) -> &BaseUrl {
        self.transport.base_url()
    }

    /// Returns the shared auth store.
    pub fn auth_store(&self) -> &AuthStore {
        self.transport.auth_store()
    }

    /// Handle for the named collection.
    pub fn collection(&self, name: impl Into<String>) -> CollectionService {
        CollectionService::new(self.clone(), name)
    }

    /// Handle for admin authentication.
    pub fn admins(&self) -> AdminService {
        AdminService::new(self.clone())
    }

    /// Handle for the health endpoint.
    pub fn health(&self) -> HealthService {
        HealthService::new(self.clone())
    }

    /// Refresh whatever principal is currently stored.
    ///
    /// # Errors
    ///
    /// Returns a state error, without a request, when the store is empty.
    pub async fn refresh_auth(&self) -> Result<AuthSnapshot, Error> {
        let principal = self
            .auth_store()
            .principal()
            .filter(|_| self.auth_store().is_valid())
            .ok_or(StateError::NotAuthenticated {
                operation: "auth refresh",
            })?;
        services::refresh(self, principal).await
    }

    pub(crate) fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

/// Builder for [`PocketBase`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    auth: Option<AuthStore>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL, e.g. `http://127.0.0.1:8090`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a per-request timeout. No timeout by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Start from an existing auth store, e.g. one restored from disk.
    pub fn auth_store(mut self, store: AuthStore) -> Self {
        self.auth = Some(store);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the base URL is missing or invalid,
    /// or the HTTP client cannot be configured.
    pub fn build(self) -> Result<PocketBase, Error> {
        let raw = self.base_url.ok_or_else(|| ValidationError::BaseUrl {
            value: String::new(),
            reason: "base URL is required".to_string(),
        })?;
        let base = BaseUrl::new(&raw)?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("pocketbase-rs/{}", env!("CARGO_PKG_VERSION")));

        let mut http = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(|e| ValidationError::Client {
            message: e.to_string(),
        })?;

        debug!(base = %base, "Client configured");
        Ok(PocketBase {
            transport: HttpTransport::new(http, base, self.auth.unwrap_or_default()),
        })
    }
}
