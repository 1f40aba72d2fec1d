//! Unit tests for duration formatting

use bmt::metrics::{format_duration, DurationUnit};

#[test]
fn auto_examples() {
    assert_eq!(format_duration(45.0, DurationUnit::Auto, true), "45.0 s");
    assert_eq!(format_duration(45.0, DurationUnit::Auto, false), "45.0");
    assert_eq!(format_duration(90.0, DurationUnit::Auto, true), "1min30s");
    assert_eq!(format_duration(5400.0, DurationUnit::Auto, true), "1h30min");
}

#[test]
fn fixed_unit_examples() {
    assert_eq!(format_duration(179.0, DurationUnit::Minutes, false), "2min59s");
    assert_eq!(format_duration(7200.0, DurationUnit::Hours, false), "2h00min");
    assert_eq!(format_duration(100.0, DurationUnit::Seconds, false), "100.0");
    assert_eq!(format_duration(4000.0, DurationUnit::Seconds, true), "4000.0 s");
}

#[test]
fn zero_duration() {
    assert_eq!(format_duration(0.0, DurationUnit::Auto, true), "0.0 s");
    assert_eq!(format_duration(0.0, DurationUnit::Minutes, false), "0min00s");
    assert_eq!(format_duration(0.0, DurationUnit::Hours, false), "0h00min");
}

#[test]
fn labels() {
    assert_eq!(DurationUnit::Auto.label(), "auto");
    assert_eq!(DurationUnit::Seconds.label(), "s");
    assert_eq!(DurationUnit::Minutes.label(), "min");
    assert_eq!(DurationUnit::Hours.label(), "h");
}

#[test]
fn parse_errors_echo_the_token() {
    let err = "quarters".parse::<DurationUnit>().unwrap_err();
    assert!(err.to_string().contains("quarters"));
    assert!(err.to_string().contains("auto|s|min|h"));
}
