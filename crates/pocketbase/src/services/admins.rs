//! Administrative accounts.

use crate::auth::{AuthSnapshot, Credentials, Principal};
use crate::client::PocketBase;
use crate::error::Error;

use super::auth;

/// Authentication for admins.
///
/// Admin tokens are stored in the same [`AuthStore`](crate::AuthStore) as
/// user tokens, tagged as [`Principal::Admin`].
#[derive(Debug, Clone)]
pub struct AdminService {
    client: PocketBase,
}

impl AdminService {
    pub(crate) fn new(client: PocketBase) -> Self {
        Self { client }
    }

    /// Authenticate an admin and store its token.
    pub async fn auth_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSnapshot, Error> {
        auth::authenticate(&self.client, Principal::Admin, credentials).await
    }

    /// Renew the stored admin token.
    ///
    /// # Errors
    ///
    /// Returns a state error, without a request, unless an admin is
    /// authenticated.
    pub async fn auth_refresh(&self) -> Result<AuthSnapshot, Error> {
        auth::refresh(&self.client, Principal::Admin).await
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.auth_store().is_admin()
    }
}
