//! Records subcommand implementations.

mod delete;
mod get;
mod list;
mod write;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct RecordsCommand {
    #[command(subcommand)]
    pub command: RecordsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordsSubcommand {
    /// List records in a collection
    List(list::ListArgs),

    /// Fetch a single record
    Get(get::GetArgs),

    /// Create a record from JSON
    Create(write::CreateArgs),

    /// Update fields of a record from JSON
    Update(write::UpdateArgs),

    /// Delete a record
    Delete(delete::DeleteArgs),
}

pub async fn handle(cmd: RecordsCommand, url: Option<&str>) -> Result<()> {
    match cmd.command {
        RecordsSubcommand::List(args) => list::run(args, url).await,
        RecordsSubcommand::Get(args) => get::run(args, url).await,
        RecordsSubcommand::Create(args) => write::create(args, url).await,
        RecordsSubcommand::Update(args) => write::update(args, url).await,
        RecordsSubcommand::Delete(args) => delete::run(args, url).await,
    }
}
