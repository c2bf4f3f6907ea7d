//! Authentication state and credential types.
//!
//! Every client owns one [`AuthStore`]; its token is attached to every
//! request the client sends.

mod credentials;
mod store;
mod tokens;

pub use credentials::Credentials;
pub use store::{AuthSnapshot, AuthStore, Principal, SUPERUSERS_COLLECTION, USERS_COLLECTION};
pub use tokens::AuthToken;
