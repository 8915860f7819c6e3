//! Configuration loading.
//!
//! Values come from a JSON file first, then from flags and environment
//! variables, which win.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use cheetah::Options;

use crate::cli::ConnectionArgs;

/// Get the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cheetah").map(|dirs| dirs.config_dir().join("config.json"))
}

/// Load options from a JSON file.
pub fn load_file(path: &Path) -> Result<Options> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let options = Options::from_json_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(options)
}

/// Resolve the effective options for this invocation.
///
/// An explicit `--config` must exist; the default file is optional.
pub fn resolve(args: &ConnectionArgs) -> Result<Options> {
    let mut options = match &args.config {
        Some(path) => load_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading default config file");
                load_file(&path)?
            }
            _ => Options::default(),
        },
    };

    apply_overrides(&mut options, args);
    options.validate().context("Incomplete configuration")?;

    Ok(options)
}

fn apply_overrides(options: &mut Options, args: &ConnectionArgs) {
    if let Some(host) = &args.host {
        options.host = host.clone();
    }
    if let Some(username) = &args.username {
        options.username = username.clone();
    }
    if let Some(password) = &args.password {
        options.password = password.clone();
    }
    if let Some(aid) = &args.aid {
        options.aid = aid.clone();
    }
    if args.no_verify_peer {
        options.verify_peer = false;
    }
    if args.disable_tracking {
        options.disable_tracking = true;
    }
    if let Some(enabled) = args.enable_tracking {
        options.enable_tracking = Some(enabled);
    }
    if let Some(filter) = &args.whitelist_filter {
        options.whitelist_filter = Some(filter.clone());
    }
}
