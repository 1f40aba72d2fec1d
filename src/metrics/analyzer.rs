//! Weekly per-project aggregation of build durations.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::io::BufRead;

use chrono::Datelike;
use tracing::{debug, info};

use super::error::ScanFailure;
use super::reader::{RecordScanner, ScanMode, ScanOutcome, DEFAULT_MAX_LINE_BYTES};
use super::record::BuildMetric;
use super::report::{week_label, BuildStats, FullReport, ProjectSummary, ReportOptions, WeeklySummary};

/// (project, ISO week-year, ISO week number)
type BucketKey = (String, i32, u32);

/// Incremental accumulator behind [`generate_report`].
///
/// Records are fed one at a time; [`finish`](Self::finish) sorts and sums.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
    buckets: BTreeMap<BucketKey, BuildStats>,
    undated: usize,
    filtered: usize,
}

impl ReportBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Add one record. Returns `false` if it was left out of the report.
    ///
    /// Records whose timestamp does not parse are left out silently, as are
    /// records outside the time range.
    pub fn add(&mut self, metric: &BuildMetric) -> bool {
        let Some(timestamp) = metric.parsed_timestamp() else {
            debug!(timestamp = %metric.timestamp, "ignoring record with unparsable timestamp");
            self.undated += 1;
            return false;
        };

        if !self.options.contains(&timestamp) {
            self.filtered += 1;
            return false;
        }

        let week = timestamp.iso_week();
        let key = (metric.project.clone(), week.year(), week.week());
        self.buckets.entry(key).or_default().add(metric.duration_sec);
        true
    }

    /// Number of records left out because their timestamp did not parse.
    pub fn undated(&self) -> usize {
        self.undated
    }

    /// Number of records left out by the time range.
    pub fn filtered(&self) -> usize {
        self.filtered
    }

    pub fn finish(self) -> FullReport {
        let mut report = FullReport {
            options: self.options,
            ..Default::default()
        };

        // BTreeMap iteration is ordered by project, then ISO year and week,
        // which matches the lexicographic order of the week labels.
        for ((project, year, week), stats) in self.buckets {
            let needs_new = report
                .projects
                .last()
                .map_or(true, |last| last.name != project);
            if needs_new {
                report.projects.push(ProjectSummary {
                    name: project,
                    weeks: Vec::new(),
                    total_duration: 0.0,
                    total_builds: 0,
                });
            }

            if let Some(summary) = report.projects.last_mut() {
                summary.total_duration += stats.total_duration;
                summary.total_builds += stats.count;
                summary.weeks.push(WeeklySummary {
                    week_label: week_label(year, week),
                    avg_duration: stats.average(),
                    stats,
                });
            }
        }

        for project in &report.projects {
            report.global_duration += project.total_duration;
            report.global_builds += project.total_builds;
        }

        report
    }
}

/// Aggregate a JSONL build log into a [`FullReport`].
///
/// Lines are scanned leniently: malformed lines are skipped and counted.
///
/// # Errors
///
/// Fails only when the input cannot be read (or a line exceeds `max_line_bytes`).
/// No partial report is returned.
pub fn generate_report<R: BufRead>(
    reader: R,
    options: ReportOptions,
) -> Result<FullReport, ScanFailure> {
    generate_report_with(reader, options, DEFAULT_MAX_LINE_BYTES).map(|(report, _)| report)
}

/// Like [`generate_report`] with a custom line limit, also returning the scan counts.
pub fn generate_report_with<R: BufRead>(
    reader: R,
    options: ReportOptions,
    max_line_bytes: usize,
) -> Result<(FullReport, ScanOutcome), ScanFailure> {
    let scanner = RecordScanner::new(ScanMode::Lenient).with_max_line_bytes(max_line_bytes);
    let mut builder = ReportBuilder::new(options);

    let outcome = scanner.scan(reader, |metric| {
        builder.add(&metric);
        Ok::<(), Infallible>(())
    })?;

    info!(
        processed = outcome.processed,
        skipped = outcome.skipped,
        undated = builder.undated(),
        filtered = builder.filtered(),
        "aggregated build log"
    );
    Ok((builder.finish(), outcome))
}
