//! Password reset commands.

use anyhow::{Context, Result};
use clap::Args;

use pocketbase::auth::USERS_COLLECTION;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Email address of the account
    #[arg(long)]
    pub email: String,

    /// Auth collection holding the account
    #[arg(long, default_value = USERS_COLLECTION)]
    pub collection: String,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Token from the reset email
    #[arg(long)]
    pub token: String,

    /// New password
    #[arg(long)]
    pub password: String,

    /// New password, repeated
    #[arg(long)]
    pub password_confirm: String,

    /// Auth collection holding the account
    #[arg(long, default_value = USERS_COLLECTION)]
    pub collection: String,
}

pub async fn request(args: RequestArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;

    client
        .collection(&args.collection)
        .request_password_reset(&args.email)
        .await
        .context("Failed to request password reset")?;

    output::success(&format!("Password reset requested for {}", args.email));
    Ok(())
}

pub async fn confirm(args: ConfirmArgs, url: Option<&str>) -> Result<()> {
    let client = session::client(url)?;

    client
        .collection(&args.collection)
        .confirm_password_reset(&args.token, &args.password, &args.password_confirm)
        .await
        .context("Failed to reset password")?;

    output::success("Password updated");
    Ok(())
}
