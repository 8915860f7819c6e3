//! Raw post command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cheetah::{Options, Params, Session};

use crate::cli::parse_key_val;
use crate::output;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// API path, e.g. /api/setuser1
    pub path: String,

    /// Parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", short = 'p', value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

/// Sends through the session directly; the whitelist does not apply.
pub async fn run(args: PostArgs, options: &Options) -> Result<()> {
    let session = Session::new(options).context("Failed to create session")?;
    let params: Params = args.params.into_iter().collect();

    session
        .send_message(&args.path, params)
        .await
        .with_context(|| format!("Failed to post to {}", args.path))?;

    output::success(&format!("Posted to {}", args.path));
    Ok(())
}
