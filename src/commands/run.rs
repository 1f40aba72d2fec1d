//! Run command handler

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use bmt::git::{GitCli, GitProbe};
use bmt::measure::{build_metric, now, HostInfo};
use bmt::metrics::append_metric;
use bmt::runner::{CommandRunner, ProcessRunner};
use bmt::system::{FileSystem, OsEnvironment, OsFileSystem};
use bmt::Config;

/// Handle the run command, returning the exit code of the measured command.
///
/// Config and log path problems, and failures to save the record, are
/// reported as warnings; the build result always wins.
#[cfg(not(tarpaulin_include))]
pub fn handle(log: Option<&Path>, command: &[String]) -> Result<i32> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!("using default config: {:#}", e);
        Config::default()
    });

    let outcome = ProcessRunner::new().run(command)?;
    let host = HostInfo::detect(&OsEnvironment);
    let git = GitCli::new().info();
    let metric = build_metric(command, &outcome, &host, &git, now());

    if let Err(e) = save(log, &config, &OsFileSystem, &metric) {
        eprintln!("[bmt] failed to save build metric: {:#}", e);
    }
    Ok(outcome.exit_code)
}

fn save(
    log: Option<&Path>,
    config: &Config,
    fs: &dyn FileSystem,
    metric: &bmt::BuildMetric,
) -> Result<()> {
    let log_path = super::log_path(log, config)?;
    append_metric(fs, &log_path, metric)
}
