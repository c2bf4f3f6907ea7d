//! Email verification commands.

use anyhow::{Context, Result};
use clap::Args;

use pocketbase::auth::USERS_COLLECTION;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Email address to verify
    #[arg(long)]
    pub email: String,

    /// Auth collection holding the account
    #[arg(long, default_value = USERS_COLLECTION)]
    pub collection: String,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Token from the verification email
    #[arg(long)]
    pub token: String,

    /// Auth collection holding the account
    #[arg(long, default_value = USERS_COLLECTION)]
    pub collection: String,
}

pub async fn request(args: RequestArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;

    client
        .collection(&args.collection)
        .request_verification(&args.email)
        .await
        .context("Failed to request verification")?;

    output::success(&format!("Verification email requested for {}", args.email));
    Ok(())
}

pub async fn confirm(args: ConfirmArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;

    client
        .collection(&args.collection)
        .confirm_verification(&args.token)
        .await
        .context("Failed to confirm verification")?;

    output::success("Email verified");
    Ok(())
}
