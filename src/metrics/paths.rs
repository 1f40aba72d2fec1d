//! Build log location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::system::Environment;

/// Environment variable overriding the log path.
pub const ENV_LOG_PATH: &str = "BUILD_METRICS_LOG";

/// Log location relative to the home directory.
pub const DEFAULT_LOG_RELATIVE: &str = ".local/share/build-metrics/build_log.jsonl";

/// Resolve the build log path.
///
/// First match wins:
/// 1. `override_path`, when non-empty
/// 2. the `BUILD_METRICS_LOG` environment variable
/// 3. `[log] path` from `config`
/// 4. `~/.local/share/build-metrics/build_log.jsonl`
///
/// # Errors
///
/// Fails only when the default is needed and no home directory is known.
pub fn resolve_log_path(
    override_path: Option<&Path>,
    env: &dyn Environment,
    config: &Config,
) -> Result<PathBuf> {
    if let Some(path) = override_path.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env.var(ENV_LOG_PATH) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.log_path(env) {
        return Ok(path);
    }
    default_log_path(env)
}

/// `~/.local/share/build-metrics/build_log.jsonl`
pub fn default_log_path(env: &dyn Environment) -> Result<PathBuf> {
    let home = env
        .home_dir()
        .context("Could not determine home directory for the build log")?;
    Ok(home.join(DEFAULT_LOG_RELATIVE))
}
