//! Scan errors.

use std::fmt;
use std::io;

use super::reader::ScanOutcome;

/// Error returned by a per-record handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Maximum number of characters of a raw line kept in a [`ScanError::MalformedLine`].
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Why a scan pass stopped.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("malformed record on line {line} (raw={snippet:?})")]
    MalformedLine {
        line: usize,
        /// Trimmed raw line, truncated to [`SNIPPET_MAX_CHARS`]
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line} exceeds the maximum length of {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    #[error("processing line {line}")]
    Handler {
        line: usize,
        #[source]
        source: HandlerError,
    },

    #[error("failed to read input at line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output")]
    Write(#[source] io::Error),
}

impl ScanError {
    /// 1-based line number the error is attributed to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ScanError::MalformedLine { line, .. }
            | ScanError::LineTooLong { line, .. }
            | ScanError::Handler { line, .. }
            | ScanError::Read { line, .. } => Some(*line),
            ScanError::Write(_) => None,
        }
    }

    pub(crate) fn malformed(line: usize, raw: &str, source: serde_json::Error) -> Self {
        ScanError::MalformedLine {
            line,
            snippet: snippet(raw),
            source,
        }
    }
}

/// A scan pass that ended early, with the counts reached before it stopped.
#[derive(Debug)]
pub struct ScanFailure {
    pub outcome: ScanOutcome,
    pub error: ScanError,
}

impl ScanFailure {
    pub fn new(outcome: ScanOutcome, error: ScanError) -> Self {
        Self { outcome, error }
    }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scan aborted after {} processed and {} skipped lines",
            self.outcome.processed, self.outcome.skipped
        )
    }
}

impl std::error::Error for ScanFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

fn snippet(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= SNIPPET_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut truncated: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();
    truncated.push('…');
    truncated
}
