//! Build metrics: log records, scanning, aggregation and export.
//!
//! Data flows from raw log bytes through [`RecordScanner`] into either the
//! weekly aggregator ([`generate_report`]) or the CSV projector
//! ([`export_csv`]).

mod analyzer;
mod duration;
mod error;
mod export;
mod paths;
mod reader;
mod record;
mod report;
mod writer;

pub use analyzer::{generate_report, generate_report_with, ReportBuilder};
pub use duration::{format_duration, DurationUnit, InvalidUnitError};
pub use error::{HandlerError, ScanError, ScanFailure, SNIPPET_MAX_CHARS};
pub use export::{csv_row, export_csv, export_csv_with, CSV_HEADER};
pub use paths::{default_log_path, resolve_log_path, DEFAULT_LOG_RELATIVE, ENV_LOG_PATH};
pub use reader::{RecordScanner, ScanMode, ScanOutcome, DEFAULT_MAX_LINE_BYTES};
pub use record::BuildMetric;
pub use report::{week_label, BuildStats, FullReport, ProjectSummary, ReportOptions, WeeklySummary};
pub use writer::{append_metric, ensure_log_dir};
