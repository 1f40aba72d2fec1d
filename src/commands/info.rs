//! Info command handler

use anyhow::Result;
use std::path::Path;

use bmt::Config;

/// Git commit embedded at build time, `unknown` for release builds.
pub(crate) fn commit() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}

/// Handle the info command.
#[cfg(not(tarpaulin_include))]
pub fn handle(log: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    println!("Build Metrics Tool");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Commit: {}", commit());
    match super::log_path(log, &config) {
        Ok(path) => println!("Log file: {}", path.display()),
        Err(e) => println!("Log file: unavailable ({:#})", e),
    }
    Ok(())
}
