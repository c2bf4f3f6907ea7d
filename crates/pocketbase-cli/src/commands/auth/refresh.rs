//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use crate::output;
use crate::session::{self, storage};

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs, url: Option<&str>) -> Result<()> {
    let client = session::authenticated_client(url)?;

    let snapshot = match client.refresh_auth().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            if err.is_unauthorized() {
                warn!("Stored token was rejected by the server");
            }
            return Err(err).context("Failed to refresh token; log in again");
        }
    };

    storage::save_session(&client).context("Failed to save session")?;

    output::success("Token refreshed");
    output::field("Record", snapshot.record().id());

    Ok(())
}
