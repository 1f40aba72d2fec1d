//! Unit tests for report rendering

use bmt::metrics::{generate_report, DurationUnit, FullReport, ReportOptions};
use bmt::view::{render_report_json, render_report_table};

use crate::helpers::load_fixture;

fn mixed_report() -> FullReport {
    generate_report(load_fixture("mixed.jsonl").as_bytes(), ReportOptions::default()).unwrap()
}

fn table(report: &FullReport, unit: DurationUnit) -> String {
    let mut out = Vec::new();
    render_report_table(&mut out, report, unit).unwrap();
    String::from_utf8(out).unwrap()
}

fn without_spaces(s: &str) -> String {
    s.chars().filter(|c| *c != ' ').collect()
}

#[test]
fn auto_unit_table() {
    let out = without_spaces(&table(&mixed_report(), DurationUnit::Auto));
    assert!(out.contains("Project:backend"));
    assert!(out.contains("Week|Total(auto)|Average(auto)|Builds"));
    assert!(out.contains("2024-W01|30.0|15.0s|2"));
    assert!(out.contains("Project:frontend"));
    assert!(out.contains("2024-W02|1h08min|34min08s|2"));
    assert!(out.contains("Total|1h09min|-|4"));
}

#[test]
fn hours_unit_applies_to_totals_only() {
    let out = without_spaces(&table(&mixed_report(), DurationUnit::Hours));
    assert!(out.contains("Week|Total(h)|Average(auto)|Builds"));
    assert!(out.contains("2024-W01|0h01min|15.0s|2"));
}

#[test]
fn projects_render_in_report_order() {
    let out = table(&mixed_report(), DurationUnit::Auto);
    let backend = out.find("Project : backend").unwrap();
    let frontend = out.find("Project : frontend").unwrap();
    let overall = out.find("Overall").unwrap();
    assert!(backend < frontend && frontend < overall);
}

#[test]
fn rendering_is_deterministic() {
    let report = mixed_report();
    assert_eq!(
        table(&report, DurationUnit::Minutes),
        table(&report, DurationUnit::Minutes)
    );
}

#[test]
fn json_round_trips_key_numbers() {
    let mut out = Vec::new();
    render_report_json(&mut out, &mixed_report()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["global_builds"], 4);
    assert_eq!(value["global_duration"], 4125.5);
    assert_eq!(value["projects"][1]["weeks"][0]["week_label"], "2024-W02");
    assert_eq!(value["projects"][1]["weeks"][0]["total_duration"], 4095.5);
}
