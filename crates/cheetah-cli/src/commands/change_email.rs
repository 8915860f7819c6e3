//! Change email command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cheetah::{Mailer, Options};

#[derive(Args, Debug)]
pub struct ChangeEmailArgs {
    /// Current subscriber address
    #[arg(long)]
    pub from: String,

    /// New subscriber address
    #[arg(long)]
    pub to: String,
}

pub async fn run(args: ChangeEmailArgs, options: &Options) -> Result<()> {
    let mailer = Mailer::new(options).context("Failed to create mailer")?;

    let delivery = mailer
        .mailing_list_email_change(&args.from, &args.to)
        .await
        .context("Failed to change subscriber email")?;

    super::report(delivery, &format!("Moved {} to {}", args.from, args.to));
    Ok(())
}
