//! Config file locations
//!
//! # Environment Variables
//!
//! - `CHEFPROV_CONFIG_DIR` - Override config directory (e.g., `~/dotfiles/chefprov`)
//!
//! # Path Resolution Priority
//!
//! 1. `CHEFPROV_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/chefprov` (if set)
//! 3. Platform config dir (`~/.config/chefprov` on Linux)

use anyhow::{Context, Result};
use chefkit::{EnvLookup, ProcessEnv};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "CHEFPROV_CONFIG_DIR";

/// Attribute document read by `configure` when no file is given
pub const DEFAULT_ATTRIBUTES_FILE: &str = "provider.toml";

/// Get the chefprov config directory path
pub fn config_dir() -> Result<PathBuf> {
    config_dir_in(&ProcessEnv)
}

/// Get the default attribute document path
pub fn default_attributes_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(DEFAULT_ATTRIBUTES_FILE))
}

fn config_dir_in(env: &dyn EnvLookup) -> Result<PathBuf> {
    if let Some(dir) = env.non_empty(ENV_CONFIG_DIR) {
        let path = PathBuf::from(shellexpand::tilde(&dir).as_ref());
        log::debug!("Using config dir from {}: {}", ENV_CONFIG_DIR, path.display());
        return Ok(path);
    }

    if let Some(xdg_config) = env.non_empty("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("chefprov");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    let base = dirs::config_dir().context("Could not determine config directory")?;
    let path = base.join("chefprov");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}
