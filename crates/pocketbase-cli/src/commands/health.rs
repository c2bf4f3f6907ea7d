//! Health command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct HealthArgs {}

pub async fn run(_args: HealthArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;

    let status = client
        .health()
        .check()
        .await
        .with_context(|| format!("Server at {} is not healthy", client.base_url()))?;

    output::success(&status.message);
    output::field("Server", client.base_url().as_str());
    output::field("Code", &status.code.to_string());

    Ok(())
}
