//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::health::HealthArgs;
use crate::commands::records::RecordsCommand;

/// PocketBase CLI tool.
#[derive(Parser, Debug)]
#[command(name = "pb")]
#[command(author, version = env!("PB_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Server URL [default: stored session's server, else http://127.0.0.1:8090]
    #[arg(long, env = "POCKETBASE_URL", global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the server is up
    Health(HealthArgs),

    /// Authentication and account operations
    Auth(AuthCommand),

    /// Record operations
    Records(RecordsCommand),
}
