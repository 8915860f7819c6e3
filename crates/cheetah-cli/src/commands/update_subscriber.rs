//! Update subscriber command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cheetah::{Mailer, Options, Params};

use crate::cli::parse_key_val;

#[derive(Args, Debug)]
pub struct UpdateSubscriberArgs {
    /// Subscriber address
    #[arg(long)]
    pub email: String,

    /// Subscriber field as KEY=VALUE, e.g. sub=123 (repeatable)
    #[arg(long = "param", short = 'p', value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

pub async fn run(args: UpdateSubscriberArgs, options: &Options) -> Result<()> {
    let mailer = Mailer::new(options).context("Failed to create mailer")?;
    let params: Params = args.params.into_iter().collect();

    let delivery = mailer
        .mailing_list_update(&args.email, params)
        .await
        .context("Failed to update subscriber")?;

    super::report(delivery, &format!("Updated subscriber {}", args.email));
    Ok(())
}
