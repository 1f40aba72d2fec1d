//! Unit tests for the JSONL record scanner

use bmt::metrics::{RecordScanner, ScanError, ScanMode, ScanOutcome, SNIPPET_MAX_CHARS};
use std::convert::Infallible;
use std::io::{self, BufRead, BufReader, Read};

use crate::helpers::load_fixture;

fn count(mode: ScanMode, input: &str) -> Result<ScanOutcome, bmt::metrics::ScanFailure> {
    RecordScanner::new(mode).scan(input.as_bytes(), |_| Ok::<(), Infallible>(()))
}

#[test]
fn lenient_counts_valid_and_malformed_lines() {
    let outcome = count(ScanMode::Lenient, &load_fixture("mixed.jsonl")).unwrap();
    assert_eq!(outcome, ScanOutcome { processed: 5, skipped: 1 });
}

#[test]
fn records_arrive_in_file_order() {
    let mut projects = Vec::new();
    RecordScanner::default()
        .scan(load_fixture("mixed.jsonl").as_bytes(), |m| {
            projects.push(m.project);
            Ok::<(), Infallible>(())
        })
        .unwrap();
    assert_eq!(
        projects,
        ["backend", "backend", "frontend", "frontend", "frontend"]
    );
}

#[test]
fn strict_reports_line_of_first_failure() {
    let failure = count(ScanMode::Strict, &load_fixture("mixed.jsonl")).unwrap_err();
    assert_eq!(failure.outcome.processed, 2);
    assert_eq!(failure.error.line(), Some(4));
}

#[test]
fn long_snippet_is_truncated() {
    let input = format!("{{{}\n", "q".repeat(1000));
    let failure = count(ScanMode::Strict, &input).unwrap_err();
    match failure.error {
        ScanError::MalformedLine { snippet, .. } => {
            assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS + 1);
            assert!(snippet.ends_with('…'));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn strict_and_lenient_agree_on_clean_input() {
    let input = load_fixture("clean.jsonl");
    assert_eq!(
        count(ScanMode::Strict, &input).unwrap(),
        count(ScanMode::Lenient, &input).unwrap()
    );
}

struct BrokenReader {
    served: bool,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
        }
        self.served = true;
        let line = b"{\"project\":\"a\"}\n";
        buf[..line.len()].copy_from_slice(line);
        Ok(line.len())
    }
}

#[test]
fn read_error_is_attributed_to_the_next_line() {
    let reader: Box<dyn BufRead> = Box::new(BufReader::new(BrokenReader { served: false }));
    let failure = RecordScanner::new(ScanMode::Lenient)
        .scan(reader, |_| Ok::<(), Infallible>(()))
        .unwrap_err();
    assert_eq!(failure.outcome.processed, 1);
    assert!(matches!(failure.error, ScanError::Read { line: 2, .. }));
}

#[test]
fn handler_errors_keep_their_source() {
    #[derive(Debug, thiserror::Error)]
    #[error("bucket full")]
    struct BucketFull;

    let failure = RecordScanner::new(ScanMode::Lenient)
        .scan("{}\n".as_bytes(), |_| Err(BucketFull))
        .unwrap_err();
    match failure.error {
        ScanError::Handler { line, source } => {
            assert_eq!(line, 1);
            assert!(source.downcast_ref::<BucketFull>().is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn out_of_range_integers_still_scan() {
    let input = "{\"project\":\"a\",\"duration_sec\":1,\"cpus\":-1}\n\
                 {\"project\":\"a\",\"returncode\":4294967296}\n";
    let mut codes = Vec::new();
    let outcome = RecordScanner::new(ScanMode::Strict)
        .scan(input.as_bytes(), |m| {
            codes.push((m.cpus, m.return_code));
            Ok::<(), Infallible>(())
        })
        .unwrap();
    assert_eq!(outcome, ScanOutcome { processed: 2, skipped: 0 });
    assert_eq!(codes, [(-1, 0), (0, 4_294_967_296)]);
}
