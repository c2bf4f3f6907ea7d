//! Password authentication and token refresh shared by user and admin handles.

use reqwest::Method;
use tracing::{debug, info, instrument};

use crate::auth::{AuthSnapshot, AuthToken, Credentials, Principal};
use crate::client::PocketBase;
use crate::error::{Error, StateError};
use crate::query::QuerySpec;
use crate::transport::{
    AUTH_REFRESH, AUTH_WITH_PASSWORD, AuthResponse, AuthWithPasswordRequest, COLLECTIONS,
};

/// Authenticate `principal` with a password and store the result.
#[instrument(skip(client, credentials), fields(identity = %credentials.identity()))]
pub(crate) async fn authenticate(
    client: &PocketBase,
    principal: Principal,
    credentials: &Credentials,
) -> Result<AuthSnapshot, Error> {
    info!(collection = principal.collection(), "Authenticating with password");

    let request = AuthWithPasswordRequest {
        identity: credentials.identity(),
        password: credentials.password(),
    };
    let response: AuthResponse = client
        .transport()
        .send_json(
            Method::POST,
            &[COLLECTIONS, principal.collection(), AUTH_WITH_PASSWORD],
            &QuerySpec::new(),
            &request,
        )
        .await?;

    Ok(store(client, principal, response))
}

/// Exchange the stored token of `principal` for a fresh one.
///
/// Fails without a network call when nothing, or a different principal, is
/// stored. On failure the stored credentials are left untouched.
#[instrument(skip(client))]
pub(crate) async fn refresh(
    client: &PocketBase,
    principal: Principal,
) -> Result<AuthSnapshot, Error> {
    let auth = client.auth_store();
    match auth.principal() {
        Some(current) if auth.is_valid() && current == principal => {}
        Some(current) if auth.is_valid() => {
            return Err(StateError::WrongPrincipal {
                operation: "auth refresh",
                expected: principal.collection().to_string(),
                current: current.collection().to_string(),
            }
            .into());
        }
        _ => {
            return Err(StateError::NotAuthenticated {
                operation: "auth refresh",
            }
            .into());
        }
    }

    debug!(collection = principal.collection(), "Refreshing token");

    let response: AuthResponse = client
        .transport()
        .send(
            Method::POST,
            &[COLLECTIONS, principal.collection(), AUTH_REFRESH],
            &QuerySpec::new(),
        )
        .await?;

    Ok(store(client, principal, response))
}

/// Store a successful auth response and return the snapshot it produced.
fn store(client: &PocketBase, principal: Principal, response: AuthResponse) -> AuthSnapshot {
    let snapshot = AuthSnapshot::new(AuthToken::new(response.token), response.record, principal);
    client.auth_store().replace(snapshot.clone());
    snapshot
}
