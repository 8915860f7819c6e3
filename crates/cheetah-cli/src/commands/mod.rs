//! Subcommand implementations.

mod change_email;
mod login;
mod post;
mod send_email;
mod show_config;
mod update_subscriber;

use anyhow::Result;
use clap::Subcommand;

use cheetah::Delivery;

use crate::cli::Cli;
use crate::config;
use crate::output;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and verify the configured credentials
    Login(login::LoginArgs),

    /// Trigger an email for a recipient
    SendEmail(send_email::SendEmailArgs),

    /// Create or update a mailing-list subscriber
    UpdateSubscriber(update_subscriber::UpdateSubscriberArgs),

    /// Change a subscriber's email address
    ChangeEmail(change_email::ChangeEmailArgs),

    /// Post raw parameters to an API path
    Post(post::PostArgs),

    /// Show the effective configuration
    Config(show_config::ConfigArgs),
}

pub async fn handle(cli: Cli) -> Result<()> {
    let options = config::resolve(&cli.connection)?;

    match cli.command {
        Command::Login(args) => login::run(args, &options).await,
        Command::SendEmail(args) => send_email::run(args, &options).await,
        Command::UpdateSubscriber(args) => update_subscriber::run(args, &options).await,
        Command::ChangeEmail(args) => change_email::run(args, &options).await,
        Command::Post(args) => post::run(args, &options).await,
        Command::Config(args) => show_config::run(args, &options),
    }
}

/// Print the outcome of a mailer call.
fn report(delivery: Delivery, sent: &str) {
    match delivery {
        Delivery::Sent => output::success(sent),
        Delivery::Suppressed => output::skipped("Suppressed: recipient does not match the whitelist"),
    }
}
