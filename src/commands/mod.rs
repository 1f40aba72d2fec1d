//! Command handlers for the BMT CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod export;
pub mod info;
pub mod report;
pub mod run;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use bmt::metrics::resolve_log_path;
use bmt::system::OsEnvironment;
use bmt::Config;

/// Resolve the build log path for `override_path` against the real environment.
pub fn log_path(override_path: Option<&Path>, config: &Config) -> Result<PathBuf> {
    resolve_log_path(override_path, &OsEnvironment, config)
        .context("Failed to resolve build log path")
}

/// Open the build log for buffered reading.
pub fn open_log(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open build log: {:?}", path))?;
    Ok(BufReader::new(file))
}
