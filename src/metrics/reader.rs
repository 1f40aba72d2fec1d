//! Streaming JSONL record scanner.
//!
//! Reads a build log one line at a time and hands every valid
//! [`BuildMetric`] to a caller-supplied handler, in file order.
//!
//! # Line policy
//!
//! - Blank lines (empty after trimming) are ignored and not counted.
//! - Invalid UTF-8 is replaced with U+FFFD before decoding, and a bare `null`
//!   line decodes to an empty record.
//! - Lines that are not valid JSON, or do not match the record schema, are
//!   counted as skipped in [`ScanMode::Lenient`] and abort the scan in
//!   [`ScanMode::Strict`].
//! - A line longer than the configured maximum always aborts the scan; it is
//!   never truncated.
//! - A handler error always aborts the scan, attributed to its line.
//!
//! # Example
//!
//! ```
//! use bmt::metrics::{RecordScanner, ScanMode};
//!
//! let log = "{\"project\":\"api\",\"duration_sec\":3}\n\nnot json\n";
//! let mut projects = Vec::new();
//! let outcome = RecordScanner::new(ScanMode::Lenient)
//!     .scan(log.as_bytes(), |m| {
//!         projects.push(m.project);
//!         Ok::<(), std::convert::Infallible>(())
//!     })
//!     .unwrap();
//! assert_eq!(outcome.processed, 1);
//! assert_eq!(outcome.skipped, 1);
//! assert_eq!(projects, ["api"]);
//! ```

use std::io::{BufRead, Read};

use serde::Serialize;
use tracing::{debug, trace};

use super::error::{HandlerError, ScanError, ScanFailure};
use super::record::BuildMetric;

/// Default maximum length of a single line (1 MiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

const INITIAL_LINE_CAPACITY: usize = 64 * 1024;

/// How malformed lines are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Count malformed lines as skipped and continue
    #[default]
    Lenient,
    /// Stop at the first malformed line
    Strict,
}

impl ScanMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ScanMode::Strict
        } else {
            ScanMode::Lenient
        }
    }
}

/// Counts for a single scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Lines decoded and accepted by the handler
    pub processed: usize,
    /// Malformed lines skipped in lenient mode
    pub skipped: usize,
}

/// Line-oriented scanner over a JSONL build log.
#[derive(Debug, Clone)]
pub struct RecordScanner {
    mode: ScanMode,
    max_line_bytes: usize,
}

impl RecordScanner {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    /// Set the maximum accepted line length in bytes, excluding the newline.
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes.max(1);
        self
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Scan `reader` to the end, calling `handler` once per valid record.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanFailure`] carrying the counts reached so far when:
    /// - the input cannot be read
    /// - a line exceeds the maximum length
    /// - a line is malformed and the mode is strict
    /// - the handler fails
    pub fn scan<R, F, E>(&self, mut reader: R, mut handler: F) -> Result<ScanOutcome, ScanFailure>
    where
        R: BufRead,
        F: FnMut(BuildMetric) -> Result<(), E>,
        E: Into<HandlerError>,
    {
        let mut outcome = ScanOutcome::default();
        let mut buf = Vec::with_capacity(INITIAL_LINE_CAPACITY.min(self.max_line_bytes + 1));
        let mut line_no = 0usize;

        loop {
            buf.clear();
            let line_limit = self.max_line_bytes as u64 + 1;
            let read = (&mut reader)
                .take(line_limit)
                .read_until(b'\n', &mut buf)
                .map_err(|source| {
                    ScanFailure::new(
                        outcome,
                        ScanError::Read {
                            line: line_no + 1,
                            source,
                        },
                    )
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            if buf.last() == Some(&b'\n') {
                buf.pop();
            } else if buf.len() > self.max_line_bytes {
                return Err(ScanFailure::new(
                    outcome,
                    ScanError::LineTooLong {
                        line: line_no,
                        limit: self.max_line_bytes,
                    },
                ));
            }

            let text = String::from_utf8_lossy(&buf);
            if text.trim().is_empty() {
                trace!(line = line_no, "blank line");
                continue;
            }

            let metric = match serde_json::from_str::<Option<BuildMetric>>(&text) {
                Ok(metric) => metric.unwrap_or_default(),
                Err(err) => {
                    if self.mode == ScanMode::Strict {
                        return Err(ScanFailure::new(
                            outcome,
                            ScanError::malformed(line_no, &text, err),
                        ));
                    }
                    debug!(line = line_no, error = %err, "skipping malformed record");
                    outcome.skipped += 1;
                    continue;
                }
            };

            handler(metric).map_err(|source| {
                ScanFailure::new(
                    outcome,
                    ScanError::Handler {
                        line: line_no,
                        source: source.into(),
                    },
                )
            })?;
            outcome.processed += 1;
        }

        debug!(
            processed = outcome.processed,
            skipped = outcome.skipped,
            "scan complete"
        );
        Ok(outcome)
    }
}

impl Default for RecordScanner {
    fn default() -> Self {
        Self::new(ScanMode::Lenient)
    }
}
