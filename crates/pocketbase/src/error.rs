//! Error types for the pocketbase library.
//!
//! Every failure path converges on [`Error`], a closed enum with one variant
//! per failure class. Whatever the variant, [`Error::status_code`] and
//! [`Error::message`] are always available.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Status reported for failures that never received an HTTP response.
pub const NO_RESPONSE_STATUS: u16 = 0;

/// The unified error type for pocketbase operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied a structurally invalid request. Never reaches the network.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The server could not be reached or the request timed out.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The server answered with a non-2xx status, or an undecodable body.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// An operation needing authentication ran while the auth store was empty.
    #[error("state error: {0}")]
    State(#[from] StateError),
}

/// Discriminant of [`Error`], for callers that only care about the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Api,
    State,
}

impl Error {
    /// Returns the failure class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Network(_) => ErrorKind::Network,
            Error::Api(_) => ErrorKind::Api,
            Error::State(_) => ErrorKind::State,
        }
    }

    /// HTTP status of the failed exchange, or [`NO_RESPONSE_STATUS`] when
    /// no response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Api(err) => err.status,
            _ => NO_RESPONSE_STATUS,
        }
    }

    /// Human-readable message. For API errors this is the server-supplied
    /// message when one was present.
    pub fn message(&self) -> String {
        match self {
            Error::Api(err) => err.message.clone(),
            Error::Validation(err) => err.to_string(),
            Error::Network(err) => err.to_string(),
            Error::State(err) => err.to_string(),
        }
    }

    /// Returns the API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True for a 401 response. Usually means the stored token expired
    /// server-side; the caller decides whether to refresh or re-authenticate.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == 401
    }
}

/// Input validation errors, raised before any request is built.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Page numbers start at 1.
    #[error("page must be a positive integer, got {value}")]
    Page { value: u32 },

    /// Page size must be at least 1.
    #[error("per_page must be a positive integer, got {value}")]
    PerPage { value: u32 },

    /// Batch size for full-list fetches must be at least 1.
    #[error("batch size must be a positive integer, got {value}")]
    BatchSize { value: u32 },

    /// Collection names cannot be empty.
    #[error("collection name must not be empty")]
    EmptyCollection,

    /// Record ids cannot be empty.
    #[error("record id must not be empty")]
    EmptyRecordId,

    /// The base URL is unusable.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A record payload is malformed.
    #[error("invalid record: {reason}")]
    Record { reason: String },

    /// The HTTP client could not be configured.
    #[error("invalid client configuration: {message}")]
    Client { message: String },
}

/// Network-level failures. All of them report [`NO_RESPONSE_STATUS`].
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The connection could not be established (refused, DNS, TLS).
    #[error("could not reach server: {message}")]
    Connection { message: String },

    /// The request did not complete in time.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Any other failure while sending or receiving.
    #[error("request failed: {message}")]
    Request { message: String },
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            NetworkError::Connection {
                message: err.to_string(),
            }
        } else {
            NetworkError::Request {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(NetworkError::from(err))
    }
}

/// Operations that need credentials when there are none.
#[derive(Debug, Error)]
pub enum StateError {
    /// No token is stored.
    #[error("{operation} requires an authenticated client")]
    NotAuthenticated { operation: &'static str },

    /// A token is stored, but for another auth collection.
    #[error("{operation} needs credentials for '{expected}', but '{current}' is authenticated")]
    WrongPrincipal {
        operation: &'static str,
        expected: String,
        current: String,
    },
}

/// Generic message used when the server did not supply one.
pub(crate) const GENERIC_FAILURE: &str = "request failed";

/// Error body returned by PocketBase on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

/// An HTTP-level failure: the server's status, message and detail payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: u16,
    message: String,
    data: Map<String, Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            status,
            message: message.into(),
            data,
        }
    }

    /// Normalize a non-2xx response body.
    ///
    /// Uses the server's `message` and `data` when the body is a PocketBase
    /// error object; falls back to a generic message otherwise.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => {
                // Each field is read on its own; a malformed `data` never
                // discards a usable `message`.
                let message = match parsed.message {
                    Some(Value::String(m)) if !m.trim().is_empty() => m,
                    _ => GENERIC_FAILURE.to_string(),
                };
                let data = match parsed.data {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                Self::new(status, message, data)
            }
            Err(_) => Self::new(status, GENERIC_FAILURE, Map::new()),
        }
    }

    /// A 2xx response whose body did not match the expected shape.
    pub(crate) fn undecodable(status: u16, err: &serde_json::Error) -> Self {
        Self::new(
            status,
            format!("could not decode response: {err}"),
            Map::new(),
        )
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Server-supplied message, or a generic one.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured detail payload (field name → `{code, message}` for
    /// validation failures). Empty when the server sent none.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Message attached to a single field in the detail payload.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.data.get(field)?.get("message")?.as_str()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
