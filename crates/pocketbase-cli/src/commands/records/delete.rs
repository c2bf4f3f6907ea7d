//! Delete record command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Collection name
    pub collection: String,

    /// Record id
    pub id: String,
}

pub async fn run(args: DeleteArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;

    client
        .collection(&args.collection)
        .delete(&args.id)
        .await
        .with_context(|| format!("Failed to delete record {}", args.id))?;

    output::success(&format!("Deleted {}", args.id));
    Ok(())
}
