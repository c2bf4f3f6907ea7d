//! Create and update record commands.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::{Map, Value};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Collection name
    pub collection: String,

    /// JSON file with the record fields (use - for stdin)
    #[arg(long)]
    pub json: String,

    /// Relations to expand in the response
    #[arg(long)]
    pub expand: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Collection name
    pub collection: String,

    /// Record id
    pub id: String,

    /// JSON file with the fields to change (use - for stdin)
    #[arg(long)]
    pub json: String,

    /// Relations to expand in the response
    #[arg(long)]
    pub expand: Option<String>,
}

pub async fn create(args: CreateArgs, url: Option<&str>) -> Result<()> {
    let fields = read_fields(&args.json)?;
    let client = session::client(url)?;

    let record = client
        .collection(&args.collection)
        .create(&fields, args.expand.as_deref())
        .await
        .context("Failed to create record")?;

    output::success(&format!("Created {}", record.id()));
    output::record(&record, true)
}

pub async fn update(args: UpdateArgs, url: Option<&str>) -> Result<()> {
    let fields = read_fields(&args.json)?;
    let client = session::client(url)?;

    let record = client
        .collection(&args.collection)
        .update(&args.id, &fields, args.expand.as_deref())
        .await
        .with_context(|| format!("Failed to update record {}", args.id))?;

    output::success(&format!("Updated {}", record.id()));
    output::record(&record, true)
}

/// Read a JSON object from a file, or stdin for `-`.
fn read_fields(source: &str) -> Result<Map<String, Value>> {
    let text = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).context("Failed to read JSON file")?
    };

    match serde_json::from_str::<Value>(&text).context("Invalid JSON")? {
        Value::Object(fields) => Ok(fields),
        _ => bail!("Record JSON must be an object"),
    }
}
