//! CSV export of a build log.

use std::io::{self, BufRead, Write};

use tracing::info;

use super::error::{ScanError, ScanFailure};
use super::reader::{RecordScanner, ScanMode, ScanOutcome, DEFAULT_MAX_LINE_BYTES};
use super::record::BuildMetric;

/// Fixed column order of the export.
pub const CSV_HEADER: [&str; 12] = [
    "timestamp",
    "user",
    "hostname",
    "os",
    "project",
    "branch",
    "commit",
    "command",
    "duration_sec",
    "returncode",
    "cpus",
    "status",
];

/// Project one record onto the [`CSV_HEADER`] columns.
///
/// Numbers use their shortest decimal form (`120`, `120.2`).
pub fn csv_row(metric: &BuildMetric) -> [String; 12] {
    [
        metric.timestamp.clone(),
        metric.user.clone(),
        metric.hostname.clone(),
        metric.os.clone(),
        metric.project.clone(),
        metric.branch.clone(),
        metric.commit.clone(),
        metric.command.clone(),
        metric.duration_sec.to_string(),
        metric.return_code.to_string(),
        metric.cpus.to_string(),
        metric.status.clone(),
    ]
}

/// Write the header and one row per valid record of `reader` to `writer`.
///
/// The header is written even when the log holds no valid record. Output is
/// flushed before returning, also when the scan fails, so rows produced
/// before an abort stay in `writer`.
///
/// # Errors
///
/// Fails like [`RecordScanner::scan`] in `mode`. A failure to write the
/// header or flush the output is reported as [`ScanError::Write`]; a failed
/// row write is attributed to its line.
pub fn export_csv<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    mode: ScanMode,
) -> Result<ScanOutcome, ScanFailure> {
    export_csv_with(reader, writer, mode, DEFAULT_MAX_LINE_BYTES)
}

/// Like [`export_csv`] with a custom line limit.
pub fn export_csv_with<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    mode: ScanMode,
    max_line_bytes: usize,
) -> Result<ScanOutcome, ScanFailure> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| ScanFailure::new(ScanOutcome::default(), ScanError::Write(into_io(e))))?;

    let scanner = RecordScanner::new(mode).with_max_line_bytes(max_line_bytes);
    let scanned = scanner.scan(reader, |metric| {
        csv_writer.write_record(csv_row(&metric)).map_err(into_io)
    });

    let flushed = csv_writer.flush();
    let outcome = match (scanned, flushed) {
        (Ok(outcome), Ok(())) => outcome,
        (Ok(outcome), Err(e)) => return Err(ScanFailure::new(outcome, ScanError::Write(e))),
        (Err(failure), Ok(())) => return Err(failure),
        (Err(failure), Err(e)) => {
            return Err(ScanFailure::new(failure.outcome, ScanError::Write(e)))
        }
    };

    info!(
        rows = outcome.processed,
        skipped = outcome.skipped,
        "exported build log as csv"
    );
    Ok(outcome)
}

fn into_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, format!("csv: {:?}", other)),
    }
}
