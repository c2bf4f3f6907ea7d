//! Collection records and auth-collection operations.

use reqwest::Method;
use serde::Serialize;
use serde::de::IgnoredAny;
use tracing::{debug, instrument};

use crate::auth::{AuthSnapshot, Credentials, Principal, SUPERUSERS_COLLECTION};
use crate::client::PocketBase;
use crate::error::{Error, ValidationError};
use crate::query::QuerySpec;
use crate::records::{ListResult, Record};
use crate::transport::{
    COLLECTIONS, CONFIRM_PASSWORD_RESET, CONFIRM_VERIFICATION, ConfirmPasswordResetRequest,
    EmailRequest, RECORDS, REQUEST_PASSWORD_RESET, REQUEST_VERIFICATION, TokenRequest,
};

use super::auth;

/// Page size used by [`CollectionService::get_full_list`] when the query
/// does not set one.
pub const DEFAULT_BATCH: u32 = 100;

/// Operations on one collection.
///
/// Obtained from [`PocketBase::collection`]. Auth operations
/// (`auth_with_password`, password reset, verification) only make sense on
/// auth collections; the server rejects them elsewhere.
#[derive(Debug, Clone)]
pub struct CollectionService {
    client: PocketBase,
    name: String,
}

impl CollectionService {
    pub(crate) fn new(client: PocketBase, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Fetch one page of records.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero page or page size, before any
    /// request is sent.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn get_list(&self, query: &QuerySpec) -> Result<ListResult, Error> {
        let name = self.checked_name()?;
        let list: ListResult = self
            .client
            .transport()
            .send(Method::GET, &[COLLECTIONS, name, RECORDS], query)
            .await?;
        debug!(
            page = list.page,
            items = list.items.len(),
            total_pages = list.total_pages,
            "Listed records"
        );
        Ok(list)
    }

    /// Fetch every matching record, page by page.
    ///
    /// Uses `query.per_page` as the batch size (default [`DEFAULT_BATCH`])
    /// and ignores `query.page`. Stops after the last page reported by the
    /// server, or at the first empty page. Records come back in page order.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn get_full_list(&self, query: &QuerySpec) -> Result<Vec<Record>, Error> {
        let batch = query.per_page.unwrap_or(DEFAULT_BATCH);
        if batch == 0 {
            return Err(ValidationError::BatchSize { value: batch }.into());
        }
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            let spec = query.clone().with_page(page).with_per_page(batch);
            let list = self.get_list(&spec).await?;
            let done = list.items.is_empty() || list.is_last_page();
            records.extend(list.items);

            if done {
                break;
            }
            match page.checked_add(1) {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!(records = records.len(), pages = page, "Fetched full list");
        Ok(records)
    }

    /// Fetch a single record by id.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn get_one(&self, id: &str, expand: Option<&str>) -> Result<Record, Error> {
        let name = self.checked_name()?;
        let id = checked_id(id)?;
        self.client
            .transport()
            .send(
                Method::GET,
                &[COLLECTIONS, name, RECORDS, id],
                &QuerySpec::expanding(expand),
            )
            .await
    }

    /// Create a record from a field mapping.
    ///
    /// Returns the created record as stored by the server, including the
    /// generated `id`.
    #[instrument(skip(self, body), fields(collection = %self.name))]
    pub async fn create<B>(&self, body: &B, expand: Option<&str>) -> Result<Record, Error>
    where
        B: Serialize + ?Sized,
    {
        let name = self.checked_name()?;
        let record: Record = self
            .client
            .transport()
            .send_json(
                Method::POST,
                &[COLLECTIONS, name, RECORDS],
                &QuerySpec::expanding(expand),
                body,
            )
            .await?;
        debug!(id = record.id(), "Created record");
        Ok(record)
    }

    /// Update the given fields of a record.
    #[instrument(skip(self, body), fields(collection = %self.name))]
    pub async fn update<B>(
        &self,
        id: &str,
        body: &B,
        expand: Option<&str>,
    ) -> Result<Record, Error>
    where
        B: Serialize + ?Sized,
    {
        let name = self.checked_name()?;
        let id = checked_id(id)?;
        self.client
            .transport()
            .send_json(
                Method::PATCH,
                &[COLLECTIONS, name, RECORDS, id],
                &QuerySpec::expanding(expand),
                body,
            )
            .await
    }

    /// Delete a record.
    #[instrument(skip(self), fields(collection = %self.name))]
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let name = self.checked_name()?;
        let id = checked_id(id)?;
        let _: IgnoredAny = self
            .client
            .transport()
            .send(
                Method::DELETE,
                &[COLLECTIONS, name, RECORDS, id],
                &QuerySpec::new(),
            )
            .await?;
        Ok(())
    }

    // ========================================================================
    // Auth collections
    // ========================================================================

    /// Authenticate a record of this auth collection and store its token.
    pub async fn auth_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSnapshot, Error> {
        let principal = self.principal()?;
        auth::authenticate(&self.client, principal, credentials).await
    }

    /// Renew the stored token of this collection's principal.
    ///
    /// # Errors
    ///
    /// Returns a state error, without a request, when the client holds no
    /// credentials for this collection.
    pub async fn auth_refresh(&self) -> Result<AuthSnapshot, Error> {
        let principal = self.principal()?;
        auth::refresh(&self.client, principal).await
    }

    /// Ask the server to email a password-reset link.
    #[instrument(skip(self, email), fields(collection = %self.name))]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), Error> {
        self.post_action(REQUEST_PASSWORD_RESET, &EmailRequest { email })
            .await
    }

    /// Set a new password using the token from a reset email.
    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<(), Error> {
        let request = ConfirmPasswordResetRequest {
            token,
            password,
            password_confirm,
        };
        self.post_action(CONFIRM_PASSWORD_RESET, &request).await
    }

    /// Ask the server to email a verification link.
    #[instrument(skip(self, email), fields(collection = %self.name))]
    pub async fn request_verification(&self, email: &str) -> Result<(), Error> {
        self.post_action(REQUEST_VERIFICATION, &EmailRequest { email })
            .await
    }

    /// Confirm an email address using the token from a verification email.
    #[instrument(skip_all, fields(collection = %self.name))]
    pub async fn confirm_verification(&self, token: &str) -> Result<(), Error> {
        self.post_action(CONFIRM_VERIFICATION, &TokenRequest { token })
            .await
    }

    async fn post_action<B: Serialize>(&self, action: &str, body: &B) -> Result<(), Error> {
        let name = self.checked_name()?;
        let _: IgnoredAny = self
            .client
            .transport()
            .send_json(
                Method::POST,
                &[COLLECTIONS, name, action],
                &QuerySpec::new(),
                body,
            )
            .await?;
        Ok(())
    }

    fn principal(&self) -> Result<Principal, Error> {
        let name = self.checked_name()?;
        Ok(if name == SUPERUSERS_COLLECTION {
            Principal::Admin
        } else {
            Principal::user(name)
        })
    }

    fn checked_name(&self) -> Result<&str, Error> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyCollection.into());
        }
        Ok(&self.name)
    }
}

fn checked_id(id: &str) -> Result<&str, Error> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyRecordId.into());
    }
    Ok(id)
}
