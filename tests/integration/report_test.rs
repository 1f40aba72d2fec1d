//! `bmt report` end to end

use predicates::prelude::*;

use crate::helpers::Sandbox;

#[test]
fn report_on_fixture() {
    let (sandbox, log) = Sandbox::with_fixture("mixed.jsonl");
    sandbox
        .bmt()
        .arg("report")
        .arg("--log")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project : backend"))
        .stdout(predicate::str::contains("Project : frontend"))
        .stdout(predicate::str::contains("2024-W02"))
        .stdout(predicate::str::contains("Overall"))
        .stderr(predicate::str::contains("Using build log:"));
}

#[test]
fn log_path_from_environment() {
    let (sandbox, log) = Sandbox::with_fixture("clean.jsonl");
    sandbox
        .bmt()
        .arg("report")
        .env("BUILD_METRICS_LOG", &log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project : backend"));
}

#[test]
fn since_filter_drops_earlier_weeks() {
    let (sandbox, log) = Sandbox::with_fixture("mixed.jsonl");
    sandbox
        .bmt()
        .args(["report", "--since", "2024-01-07", "--log"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Period: since 2024-01-07"))
        .stdout(predicate::str::contains("Project : backend").not())
        .stdout(predicate::str::contains("Project : frontend"));
}

#[test]
fn unit_from_config_is_used() {
    let (sandbox, log) = Sandbox::with_fixture("clean.jsonl");
    sandbox.write_config("[report]\nunit = \"s\"\n");
    sandbox
        .bmt()
        .arg("report")
        .arg("--log")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total (s)"));
}

#[test]
fn json_format() {
    let (sandbox, log) = Sandbox::with_fixture("clean.jsonl");
    let output = sandbox
        .bmt()
        .args(["report", "--format", "json", "--log"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["global_builds"], 2);
    assert_eq!(value["projects"][0]["name"], "backend");
}

#[test]
fn reversed_range_is_rejected() {
    let (sandbox, log) = Sandbox::with_fixture("clean.jsonl");
    sandbox
        .bmt()
        .args(["report", "--since", "2024-02-01", "--until", "2024-01-01", "--log"])
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("after --until"));
}

#[test]
fn missing_log_fails_with_path() {
    let sandbox = Sandbox::new();
    sandbox
        .bmt()
        .args(["report", "--log", "/nonexistent/dir/log.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/dir/log.jsonl"));
}
