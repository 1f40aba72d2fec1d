//! Appending records to the build log.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::record::BuildMetric;
use crate::system::FileSystem;

/// Create the parent directory of `log_path` if it is missing.
pub fn ensure_log_dir(fs: &dyn FileSystem, log_path: &Path) -> Result<()> {
    match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs
            .create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent)),
        _ => Ok(()),
    }
}

/// Append `metric` to `log_path` as one JSON line.
pub fn append_metric(fs: &dyn FileSystem, log_path: &Path, metric: &BuildMetric) -> Result<()> {
    ensure_log_dir(fs, log_path)?;

    let mut line = metric
        .to_json_line()
        .context("Failed to serialize build metric")?;
    line.push('\n');

    fs.append(log_path, line.as_bytes())
        .with_context(|| format!("Failed to append to build log: {:?}", log_path))?;
    debug!(path = %log_path.display(), project = %metric.project, "saved build metric");
    Ok(())
}
