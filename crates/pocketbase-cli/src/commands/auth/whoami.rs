//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;
use pocketbase::BaseUrl;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the stored identity record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show the stored identity. With `--url`/`POCKETBASE_URL` set, only a
/// session issued by that server counts.
pub fn run(args: WhoamiArgs, url: Option<&str>) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'pb auth login' first.")?;

    if let Some(url) = url {
        let base: BaseUrl = url.parse().context("Invalid server URL")?;
        if !session.is_for(&base) {
            anyhow::bail!("No active session for {base}. Run 'pb auth login' first.");
        }
    }

    if args.json {
        return output::json_pretty(&session.record);
    }

    let kind = if session.principal.is_admin() { "admin" } else { "user" };
    output::field("Server", session.url.as_str());
    output::field("Kind", kind);
    output::field("Collection", session.principal.collection());
    output::field("Record", session.record.id());
    if let Some(email) = session.record.get("email").and_then(|v| v.as_str()) {
        output::field("Email", email);
    }
    output::field("Saved", &session.saved_at.to_rfc3339());

    Ok(())
}
