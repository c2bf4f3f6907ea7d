//! HTTP client implementation.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::auth::AuthStore;
use crate::error::{ApiError, Error};
use crate::query::QuerySpec;
use crate::types::BaseUrl;

/// Body decoded when a successful response carries none (e.g. 204).
const EMPTY_BODY: &[u8] = b"{}";

/// Sends API requests for one client.
///
/// Attaches the token held by the client's [`AuthStore`] to every request
/// and turns every failure into an [`Error`]. Never retries: a failed
/// write is reported, not repeated.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: BaseUrl,
    auth: AuthStore,
}

impl HttpTransport {
    /// Create a transport sharing the given auth store.
    pub fn new(client: reqwest::Client, base: BaseUrl, auth: AuthStore) -> Self {
        Self { client, base, auth }
    }

    /// Returns the server URL this transport is configured for.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    /// Returns the auth store consulted on every request.
    pub fn auth_store(&self) -> &AuthStore {
        &self.auth
    }

    /// Send a request without a body.
    ///
    /// `segments` are the path below `/api/`.
    #[instrument(skip(self, query), fields(base = %self.base))]
    pub async fn send<R>(
        &self,
        method: Method,
        segments: &[&str],
        query: &QuerySpec,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let request = self.request(method, segments, query)?;
        self.execute(request).await
    }

    /// Send a request with a JSON body.
    #[instrument(skip(self, query, body), fields(base = %self.base))]
    pub async fn send_json<B, R>(
        &self,
        method: Method,
        segments: &[&str],
        query: &QuerySpec,
        body: &B,
    ) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.request(method, segments, query)?.json(body);
        self.execute(request).await
    }

    /// Build a request: validated query, endpoint URL, auth header.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &QuerySpec,
    ) -> Result<RequestBuilder, Error> {
        // Encode first so an invalid query never produces a URL.
        let query = query.encode()?;
        let mut url = self.base.endpoint(segments)?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        debug!(%method, path = url.path(), "API request");
        trace!(query = url.query().unwrap_or_default(), "query string");

        let mut request = self.client.request(method, url);
        if let Some(token) = self.auth.token().filter(|t| !t.is_empty()) {
            request = request.header(AUTHORIZATION, token.header_value());
        }
        Ok(request)
    }

    /// Send the request and decode or normalize the response.
    async fn execute<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, Error> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // The status is known even if the body cannot be read.
            let error = match response.bytes().await {
                Ok(bytes) => ApiError::from_response(status.as_u16(), &bytes),
                Err(err) => {
                    debug!(status = %status, error = %err, "Error body unreadable");
                    ApiError::from_response(status.as_u16(), b"")
                }
            };
            debug!(status = error.status(), message = error.message(), "API error");
            return Err(error.into());
        }

        let bytes = response.bytes().await?;
        trace!(status = %status, bytes = bytes.len(), "API response");

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            EMPTY_BODY
        } else {
            &bytes
        };
        serde_json::from_slice(body)
            .map_err(|e| ApiError::undecodable(status.as_u16(), &e).into())
    }
}
