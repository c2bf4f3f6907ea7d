//! Endpoint path segments and request/response bodies.

use serde::{Deserialize, Serialize};

use crate::records::Record;

// ============================================================================
// Path Segments
// ============================================================================

/// /api/collections/{collection}/...
pub const COLLECTIONS: &str = "collections";

/// /api/collections/{collection}/records[/{id}]
pub const RECORDS: &str = "records";

/// /api/collections/{collection}/auth-with-password
pub const AUTH_WITH_PASSWORD: &str = "auth-with-password";

/// /api/collections/{collection}/auth-refresh
pub const AUTH_REFRESH: &str = "auth-refresh";

/// /api/collections/{collection}/request-password-reset
pub const REQUEST_PASSWORD_RESET: &str = "request-password-reset";

/// /api/collections/{collection}/confirm-password-reset
pub const CONFIRM_PASSWORD_RESET: &str = "confirm-password-reset";

/// /api/collections/{collection}/request-verification
pub const REQUEST_VERIFICATION: &str = "request-verification";

/// /api/collections/{collection}/confirm-verification
pub const CONFIRM_VERIFICATION: &str = "confirm-verification";

/// /api/health
pub const HEALTH: &str = "health";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for auth-with-password.
#[derive(Serialize)]
pub struct AuthWithPasswordRequest<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

/// Response from auth-with-password and auth-refresh.
///
/// Older servers return the admin account under `admin`. Not `Debug`, so
/// the token cannot end up in logs.
#[derive(Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(alias = "admin")]
    pub record: Record,
}

/// Request body carrying only an email address.
#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

/// Request body carrying only a one-time token.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub token: &'a str,
}

/// Request body for confirm-password-reset.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPasswordResetRequest<'a> {
    pub token: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
}
