//! Export command handler

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use bmt::metrics::{ensure_log_dir, export_csv_with, ScanMode, ScanOutcome};
use bmt::system::OsFileSystem;
use bmt::Config;

/// Handle the export command.
///
/// `out` of `None` or `-` writes to stdout. The row count summary goes to stderr.
#[cfg(not(tarpaulin_include))]
pub fn handle(log: Option<&Path>, out: Option<&Path>, strict: bool) -> Result<()> {
    let config = Config::load()?;
    let log_path = super::log_path(log, &config)?;
    let mode = ScanMode::from_strict(strict || config.export.strict);
    let reader = super::open_log(&log_path)?;
    let max_line_bytes = config.log.max_line_bytes;

    let target = out.filter(|p| *p != Path::new("-"));
    let outcome = match target {
        Some(path) => {
            ensure_log_dir(&OsFileSystem, path)
                .with_context(|| format!("Failed to create output directory for {:?}", path))?;
            let file =
                File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
            export_csv_with(reader, BufWriter::new(file), mode, max_line_bytes)
        }
        None => export_csv_with(reader, io::stdout().lock(), mode, max_line_bytes),
    }
    .context("Failed to export build log")?;

    eprintln!("{}", summary(&outcome, target));
    Ok(())
}

/// `exported: N rows (skipped: M)`, plus ` -> PATH` for file output.
pub(crate) fn summary(outcome: &ScanOutcome, target: Option<&Path>) -> String {
    let mut line = format!(
        "exported: {} rows (skipped: {})",
        outcome.processed, outcome.skipped
    );
    if let Some(path) = target {
        line.push_str(&format!(" -> {}", path.display()));
    }
    line
}
