//! Report data model produced by the aggregator.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Optional time-range filter. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<FixedOffset>>,
}

impl ReportOptions {
    pub fn new(
        since: Option<DateTime<FixedOffset>>,
        until: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self { since, until }
    }

    /// True when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    /// Whether `instant` falls inside the range.
    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        self.since.map_or(true, |since| *instant >= since)
            && self.until.map_or(true, |until| *instant <= until)
    }
}

/// Accumulated duration and count for one (project, ISO week) bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BuildStats {
    pub total_duration: f64,
    pub count: u64,
}

impl BuildStats {
    pub fn add(&mut self, duration_sec: f64) {
        self.total_duration += duration_sec;
        self.count += 1;
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_duration / self.count as f64
        }
    }
}

/// One ISO week of one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    /// `YYYY-Www`, e.g. `2024-W01`
    pub week_label: String,
    #[serde(flatten)]
    pub stats: BuildStats,
    pub avg_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    /// Sorted ascending by week label
    pub weeks: Vec<WeeklySummary>,
    pub total_duration: f64,
    pub total_builds: u64,
}

/// Aggregated report over a whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FullReport {
    /// Sorted ascending by project name
    pub projects: Vec<ProjectSummary>,
    pub global_duration: f64,
    pub global_builds: u64,
    pub options: ReportOptions,
}

/// Format an ISO week-year and week number as `YYYY-Www`.
pub fn week_label(iso_year: i32, week: u32) -> String {
    format!("{}-W{:02}", iso_year, week)
}
