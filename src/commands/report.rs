//! Report command handler

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use std::io::{self, Write};
use std::path::Path;

use bmt::metrics::{generate_report_with, DurationUnit, ReportOptions};
use bmt::view::{render_report_json, render_report_table, ReportFormat};
use bmt::Config;

/// Handle the report command.
///
/// Prints the resolved log path to stderr and the report to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    log: Option<&Path>,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    unit: Option<DurationUnit>,
    format: ReportFormat,
) -> Result<()> {
    let config = Config::load()?;
    let log_path = super::log_path(log, &config)?;
    eprintln!("Using build log: {}", log_path.display());

    let options = report_options(since, until)?;
    let unit = unit.unwrap_or(config.report.unit);
    let reader = super::open_log(&log_path)?;

    let (report, _) = generate_report_with(reader, options, config.log.max_line_bytes)
        .with_context(|| format!("Failed to process build log: {:?}", log_path))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        ReportFormat::Table => render_report_table(&mut out, &report, unit)?,
        ReportFormat::Json => render_report_json(&mut out, &report)?,
    }
    out.flush()?;
    Ok(())
}

/// Build report options from calendar days, each resolved to local midnight.
pub(crate) fn report_options(
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Result<ReportOptions> {
    if let (Some(since), Some(until)) = (since, until) {
        if since > until {
            bail!("--since ({}) is after --until ({})", since, until);
        }
    }
    Ok(ReportOptions::new(
        since.map(local_midnight).transpose()?,
        until.map(local_midnight).transpose()?,
    ))
}

/// Start of `date` in the local timezone.
fn local_midnight(date: NaiveDate) -> Result<DateTime<FixedOffset>> {
    midnight_in(&Local, date)
}

fn midnight_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
    let naive = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date: {}", date))?;
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("Local midnight does not exist on {}", date))?;
    Ok(local.fixed_offset())
}
