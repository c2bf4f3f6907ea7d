//! Auth subcommand implementations.

mod login;
mod logout;
mod password_reset;
mod refresh;
mod verification;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Authenticate with a password and store the session
    Login(login::LoginArgs),

    /// Display the stored session
    Whoami(whoami::WhoamiArgs),

    /// Exchange the stored token for a fresh one
    Refresh(refresh::RefreshArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),

    /// Email a password-reset link
    RequestPasswordReset(password_reset::RequestArgs),

    /// Set a new password with a reset token
    ConfirmPasswordReset(password_reset::ConfirmArgs),

    /// Email a verification link
    RequestVerification(verification::RequestArgs),

    /// Confirm an email address with a verification token
    ConfirmVerification(verification::ConfirmArgs),
}

pub async fn handle(cmd: AuthCommand, url: Option<&str>) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, url).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, url),
        AuthSubcommand::Refresh(args) => refresh::run(args, url).await,
        AuthSubcommand::Logout(args) => logout::run(args),
        AuthSubcommand::RequestPasswordReset(args) => password_reset::request(args, url).await,
        AuthSubcommand::ConfirmPasswordReset(args) => password_reset::confirm(args, url).await,
        AuthSubcommand::RequestVerification(args) => verification::request(args, url).await,
        AuthSubcommand::ConfirmVerification(args) => verification::confirm(args, url).await,
    }
}
