//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::commands::Command;

/// CheetahMail API command-line tool.
#[derive(Parser, Debug)]
#[command(name = "cheetah")]
#[command(author, version = env!("CHEETAH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings. Each one overrides the value from the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Path to a JSON config file (defaults to the user config directory)
    #[arg(long, global = true, env = "CHEETAH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Service host, e.g. ebm.cheetahmail.com
    #[arg(long, global = true, env = "CHEETAH_HOST")]
    pub host: Option<String>,

    /// API username
    #[arg(long, global = true, env = "CHEETAH_USERNAME")]
    pub username: Option<String>,

    /// API password
    #[arg(long, global = true, env = "CHEETAH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Account id sent as `aid` with every request
    #[arg(long, global = true, env = "CHEETAH_AID")]
    pub aid: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub no_verify_peer: bool,

    /// Mark every request as a test so the service does not track it
    #[arg(long, global = true, env = "CHEETAH_DISABLE_TRACKING")]
    pub disable_tracking: bool,

    /// Set to false to mark every request as a test (same as --disable-tracking)
    #[arg(long, global = true, env = "CHEETAH_ENABLE_TRACKING", value_name = "BOOL")]
    pub enable_tracking: Option<bool>,

    /// Only mail recipients whose address matches this regex
    #[arg(long, global = true, env = "CHEETAH_WHITELIST_FILTER")]
    pub whitelist_filter: Option<String>,
}

/// Parse a `KEY=VALUE` pair.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
