//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::metrics::{DurationUnit, DEFAULT_MAX_LINE_BYTES};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Build log location and scan limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file path; `~/` is expanded. Unset means the default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Longest accepted log line in bytes
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

pub fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

/// Report rendering defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Unit for week totals (auto, s, min, h or an alias)
    #[serde(default)]
    pub unit: DurationUnit,
}

/// CSV export defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Abort on the first malformed line instead of skipping it
    #[serde(default)]
    pub strict: bool,
}
