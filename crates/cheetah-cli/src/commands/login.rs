//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use cheetah::{Options, Session};

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {}

pub async fn run(_args: LoginArgs, options: &Options) -> Result<()> {
    let session = Session::new(options).context("Failed to create session")?;

    eprintln!("{}", "Logging in...".dimmed());
    session.login().await.context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Host", session.base_url().as_str());
    output::field("Username", &options.username);

    Ok(())
}
