//! Server health check.

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::client::PocketBase;
use crate::error::Error;
use crate::query::QuerySpec;
use crate::transport::HEALTH;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Health endpoint. Needs no authentication.
#[derive(Debug, Clone)]
pub struct HealthService {
    client: PocketBase,
}

impl HealthService {
    pub(crate) fn new(client: PocketBase) -> Self {
        Self { client }
    }

    /// Ask the server whether it is up.
    #[instrument(skip(self))]
    pub async fn check(&self) -> Result<HealthStatus, Error> {
        self.client
            .transport()
            .send(Method::GET, &[HEALTH], &QuerySpec::new())
            .await
    }

    /// True when the server answered the health check with a 2xx.
    pub async fn is_healthy(&self) -> bool {
        self.check().await.is_ok()
    }
}
