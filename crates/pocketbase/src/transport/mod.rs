//! HTTP transport for the PocketBase REST API.
//!
//! This module sends requests, attaches the stored token and normalizes
//! every failure into [`crate::Error`].

mod client;
mod endpoints;

pub use client::HttpTransport;
pub(crate) use endpoints::*;
