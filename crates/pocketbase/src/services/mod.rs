//! Service handles for collections, admins and health.
//!
//! Handles are cheap and stateless: each holds a clone of the client, so
//! they all share the client's transport and auth store.

mod admins;
mod auth;
mod collection;
mod health;

pub use admins::AdminService;
pub use collection::{CollectionService, DEFAULT_BATCH};
pub use health::{HealthService, HealthStatus};

pub(crate) use auth::refresh;
