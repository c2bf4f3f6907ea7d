//! Shared authentication state.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::records::Record;

use super::tokens::AuthToken;

/// Default auth collection for regular users.
pub const USERS_COLLECTION: &str = "users";

/// Auth collection holding administrative accounts.
pub const SUPERUSERS_COLLECTION: &str = "_superusers";

/// The kind of identity a token was issued to.
///
/// Users and admins are never conflated: an admin token does not make
/// [`AuthStore::is_user`] true, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Principal {
    /// A record of a regular auth collection.
    User { collection: String },
    /// An administrative account.
    Admin,
}

impl Principal {
    /// A user of the given auth collection.
    pub fn user(collection: impl Into<String>) -> Self {
        Principal::User {
            collection: collection.into(),
        }
    }

    /// The auth collection the principal belongs to.
    pub fn collection(&self) -> &str {
        match self {
            Principal::User { collection } => collection,
            Principal::Admin => SUPERUSERS_COLLECTION,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Admin)
    }
}

/// Token, identity record and principal kind, always held together.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    token: AuthToken,
    record: Record,
    principal: Principal,
}

impl AuthSnapshot {
    pub fn new(token: AuthToken, record: Record, principal: Principal) -> Self {
        Self {
            token,
            record,
            principal,
        }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

/// Holds the current credentials of one client.
///
/// Cheap to clone; clones share the same state, so every service handle
/// created from a client observes the same credentials. Readers always see
/// either the previous or the next complete snapshot, never a mix. When two
/// writers race, the last one to finish wins.
///
/// This is a presence check only. Whether the server still accepts the
/// token is discovered on the next request (a 401).
///
/// # Example
///
/// ```
/// use pocketbase::{AuthStore, AuthToken, Principal, Record};
/// use serde_json::json;
///
/// let store = AuthStore::new();
/// assert!(!store.is_valid());
///
/// let record = Record::new(json!({"id": "u1", "email": "user@example.com"})).unwrap();
/// store.set(AuthToken::new("abc"), record, Principal::user("users"));
/// assert!(store.is_valid());
/// assert_eq!(store.model().unwrap()["email"], "user@example.com");
///
/// store.clear();
/// store.clear();
/// assert!(store.model().is_none());
/// ```
#[derive(Clone, Default)]
pub struct AuthStore {
    inner: Arc<RwLock<Option<AuthSnapshot>>>,
}

impl AuthStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current credentials in one step.
    pub fn set(&self, token: AuthToken, record: Record, principal: Principal) {
        self.replace(AuthSnapshot::new(token, record, principal));
    }

    /// Replace the current credentials with a complete snapshot.
    pub fn replace(&self, snapshot: AuthSnapshot) {
        info!(
            record_id = snapshot.record.id(),
            collection = snapshot.principal.collection(),
            "Storing credentials"
        );
        *self.write() = Some(snapshot);
    }

    /// Remove the current credentials. Calling it on an empty store is a no-op.
    pub fn clear(&self) {
        if self.write().take().is_some() {
            debug!("Credentials cleared");
        }
    }

    /// True iff a non-empty token is stored.
    pub fn is_valid(&self) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|snapshot| !snapshot.token.is_empty())
    }

    /// True iff valid credentials of an admin are stored.
    pub fn is_admin(&self) -> bool {
        self.is_valid_for(Principal::is_admin)
    }

    /// True iff valid credentials of a regular user are stored.
    pub fn is_user(&self) -> bool {
        self.is_valid_for(|principal| !principal.is_admin())
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<AuthToken> {
        self.read().as_ref().map(|snapshot| snapshot.token.clone())
    }

    /// The identity record of the current principal, if any.
    pub fn model(&self) -> Option<Record> {
        self.read().as_ref().map(|snapshot| snapshot.record.clone())
    }

    /// The kind of the current principal, if any.
    pub fn principal(&self) -> Option<Principal> {
        self.read()
            .as_ref()
            .map(|snapshot| snapshot.principal.clone())
    }

    /// A consistent copy of everything stored.
    pub fn snapshot(&self) -> Option<AuthSnapshot> {
        self.read().clone()
    }

    fn is_valid_for(&self, predicate: impl Fn(&Principal) -> bool) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|snapshot| !snapshot.token.is_empty() && predicate(&snapshot.principal))
    }

    // Every write replaces the whole snapshot, so a poisoned lock still
    // holds a complete value.
    fn read(&self) -> RwLockReadGuard<'_, Option<AuthSnapshot>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<AuthSnapshot>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("valid", &self.is_valid())
            .field("principal", &self.principal())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
