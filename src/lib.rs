//! Build Metrics Tool (BMT) Library
//!
//! Measures build commands into an append-only JSONL log and turns that log
//! into weekly per-project reports and CSV exports.

pub mod cli;
pub mod config;
pub mod git;
pub mod measure;
pub mod metrics;
pub mod runner;
pub mod system;
pub mod view;

pub use config::Config;
pub use metrics::{BuildMetric, FullReport, RecordScanner, ScanMode, ScanOutcome};
