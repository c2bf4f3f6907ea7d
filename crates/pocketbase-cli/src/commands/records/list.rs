//! List records command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pocketbase::QuerySpec;
use pocketbase::services::DEFAULT_BATCH;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection name
    pub collection: String,

    /// Page number, starting at 1
    #[arg(long, conflicts_with = "all")]
    pub page: Option<u32>,

    /// Records per page
    #[arg(long, conflicts_with = "all")]
    pub per_page: Option<u32>,

    /// Filter expression, e.g. "status = 'published'"
    #[arg(long)]
    pub filter: Option<String>,

    /// Sort fields, '-' prefix for descending
    #[arg(long)]
    pub sort: Option<String>,

    /// Relations to expand
    #[arg(long)]
    pub expand: Option<String>,

    /// Fetch every page
    #[arg(long)]
    pub all: bool,

    /// Page size used with --all
    #[arg(long, requires = "all", default_value_t = DEFAULT_BATCH)]
    pub batch: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ListArgs {
    fn query(&self) -> QuerySpec {
        QuerySpec {
            page: self.page,
            per_page: if self.all { Some(self.batch) } else { self.per_page },
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            expand: self.expand.clone(),
        }
    }
}

pub async fn run(args: ListArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;
    let collection = client.collection(&args.collection);
    let query = args.query();

    if args.all {
        let records = collection
            .get_full_list(&query)
            .await
            .context("Failed to list records")?;

        if records.is_empty() {
            output::note("No records found.");
        }
        for record in &records {
            output::record(record, args.pretty)?;
        }
        return Ok(());
    }

    let list = collection
        .get_list(&query)
        .await
        .context("Failed to list records")?;

    if list.items.is_empty() {
        output::note("No records found.");
    }
    for record in &list.items {
        output::record(record, args.pretty)?;
    }

    eprintln!();
    eprintln!(
        "{}: {}/{} ({} records)",
        "Page".dimmed(),
        list.page,
        list.total_pages,
        list.total_items
    );

    Ok(())
}
