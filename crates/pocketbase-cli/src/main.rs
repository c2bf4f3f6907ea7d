//! pb - CLI tool for exploring a PocketBase server.
//!
//! This is a thin wrapper over the `pocketbase` library, intended for manual
//! exploration and debugging. Login state is persisted between runs.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, health, records};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let url = cli.url.as_deref();
    match cli.command {
        Commands::Health(args) => health::run(args, url).await,
        Commands::Auth(cmd) => auth::handle(cmd, url).await,
        Commands::Records(cmd) => records::handle(cmd, url).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays parseable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
