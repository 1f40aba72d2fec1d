//! Configuration I/O operations

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use super::types::Config;
use crate::system::{Environment, FileSystem};

/// Get the config file path (~/.config/bmt/config.toml)
pub fn config_path(env: &dyn Environment) -> Result<PathBuf> {
    Ok(config_dir(env)?.join("config.toml"))
}

/// Get the config directory path (~/.config/bmt)
pub fn config_dir(env: &dyn Environment) -> Result<PathBuf> {
    let home = env
        .home_dir()
        .context("Could not determine home directory")?;
    Ok(home.join(".config").join("bmt"))
}

/// Load configuration from file, or return defaults if not found
pub fn load(env: &dyn Environment, fs: &dyn FileSystem) -> Result<Config> {
    let config_path = config_path(env)?;

    if fs.exists(&config_path) {
        let contents = fs
            .read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let config = parse(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

/// Parse and validate a config document.
pub fn parse(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.log.max_line_bytes == 0 {
        bail!("Invalid config: [log] max_line_bytes must be greater than zero");
    }
    Ok(config)
}
