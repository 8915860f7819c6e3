//! Send email command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cheetah::{Mailer, Options, Params};

use crate::cli::parse_key_val;

#[derive(Args, Debug)]
pub struct SendEmailArgs {
    /// Trigger email id (eid)
    #[arg(long)]
    pub eid: String,

    /// Recipient address
    #[arg(long)]
    pub email: String,

    /// Personalisation field as KEY=VALUE (repeatable)
    #[arg(long = "param", short = 'p', value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

pub async fn run(args: SendEmailArgs, options: &Options) -> Result<()> {
    let mailer = Mailer::new(options).context("Failed to create mailer")?;
    let params: Params = args.params.into_iter().collect();

    let delivery = mailer
        .send_email(&args.eid, &args.email, params)
        .await
        .context("Failed to send email")?;

    super::report(
        delivery,
        &format!("Triggered '{}' for {}", args.eid, args.email),
    );
    Ok(())
}
