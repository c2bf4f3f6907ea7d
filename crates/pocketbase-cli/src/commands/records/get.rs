//! Get record command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Collection name
    pub collection: String,

    /// Record id
    pub id: String,

    /// Relations to expand
    #[arg(long)]
    pub expand: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;

    let record = client
        .collection(&args.collection)
        .get_one(&args.id, args.expand.as_deref())
        .await
        .with_context(|| format!("Failed to fetch record {}", args.id))?;

    output::record(&record, args.pretty)
}
