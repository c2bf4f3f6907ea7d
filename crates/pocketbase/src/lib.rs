//! pocketbase - PocketBase REST API Client
//!
//! This library provides a typed client for a PocketBase server. All requests
//! flow through a [`PocketBase`] client, which owns the shared [`AuthStore`]
//! and hands out cheap service handles for collections, admins and health.
//!
//! # Example
//!
//! ```no_run
//! use pocketbase::{Credentials, PocketBase, QuerySpec};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), pocketbase::Error> {
//! let client = PocketBase::new("http://127.0.0.1:8090")?;
//! client
//!     .collection("users")
//!     .auth_with_password(&Credentials::new("user@example.com", "secret"))
//!     .await?;
//!
//! let posts = client.collection("posts");
//! let created = posts.create(&json!({"title": "Hello"}), None).await?;
//!
//! let query = QuerySpec::new().with_sort("-created").with_expand("author");
//! for record in posts.get_full_list(&query).await? {
//!     println!("{}: {}", record.id(), record["title"]);
//! }
//!
//! posts.delete(created.id()).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod query;
pub mod records;
pub mod services;
pub mod transport;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AuthSnapshot, AuthStore, AuthToken, Credentials, Principal};
pub use client::{ClientBuilder, PocketBase};
pub use error::{
    ApiError, Error, ErrorKind, NO_RESPONSE_STATUS, NetworkError, StateError, ValidationError,
};
pub use query::QuerySpec;
pub use records::{Expanded, ListResult, Record};
pub use services::{AdminService, CollectionService, HealthService, HealthStatus};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
