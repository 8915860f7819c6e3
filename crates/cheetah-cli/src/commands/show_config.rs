//! Config command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use cheetah::Options;

use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

pub fn run(_args: ConfigArgs, options: &Options) -> Result<()> {
    let default_path = config::default_config_path().map(|p| p.display().to_string());

    output::json_pretty(&json!({
        "host": options.host,
        "username": options.username,
        "password": "[REDACTED]",
        "aid": options.aid,
        "verify_peer": options.verify_peer,
        "disable_tracking": options.disable_tracking,
        "enable_tracking": options.enable_tracking,
        "tracking_disabled": options.tracking_disabled(),
        "whitelist_filter": options.whitelist_filter,
        "default_config_path": default_path,
    }))
}
