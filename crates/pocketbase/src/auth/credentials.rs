//! Password credentials type.

use std::fmt;

/// Identity and password for password-based authentication.
///
/// The identity is whatever the auth collection accepts as a login
/// identifier, usually an email or username.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use pocketbase::Credentials;
///
/// let creds = Credentials::new("user@example.com", "hunter22");
/// assert_eq!(creds.identity(), "user@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identity: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(identity: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            password: password.into(),
        }
    }

    /// Returns the identity (email or username).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
