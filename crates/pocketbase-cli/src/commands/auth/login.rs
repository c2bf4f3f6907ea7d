//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pocketbase::Credentials;
use pocketbase::auth::USERS_COLLECTION;

use crate::output;
use crate::session::{self, storage};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email or username to authenticate with
    #[arg(long)]
    pub identity: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Auth collection holding the account
    #[arg(long, default_value = USERS_COLLECTION)]
    pub collection: String,

    /// Authenticate as an admin instead of a collection user
    #[arg(long, conflicts_with = "collection")]
    pub admin: bool,
}

pub async fn run(args: LoginArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;
    let credentials = Credentials::new(&args.identity, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let snapshot = if args.admin {
        client.admins().auth_with_password(&credentials).await
    } else {
        client
            .collection(&args.collection)
            .auth_with_password(&credentials)
            .await
    }
    .context("Failed to login")?;

    storage::save_session(&client).context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("Server", client.base_url().as_str());
    output::field("Collection", snapshot.principal().collection());
    output::field("Record", snapshot.record().id());

    Ok(())
}
