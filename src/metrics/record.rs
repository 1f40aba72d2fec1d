//! Build metric record model
//!
//! One [`BuildMetric`] is one line of the build log. Every field is
//! defaultable: a missing key or an explicit `null` decodes to the field's
//! zero value, unknown keys are ignored. Wrong types and negative or
//! non-finite durations are rejected as schema violations.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// A single build execution event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildMetric {
    /// RFC3339 timestamp of when the build finished
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project: String,
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub commit: String,
    /// Free-text command line that was measured
    #[serde(deserialize_with = "null_as_default")]
    pub command: String,
    /// Wall-clock duration in seconds
    #[serde(rename = "duration_sec", deserialize_with = "non_negative_seconds")]
    pub duration_sec: f64,
    #[serde(rename = "returncode", deserialize_with = "null_as_default")]
    pub return_code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cpus: i64,
    /// "success", "failure" or "interrupted"
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

impl BuildMetric {
    /// Parse the record timestamp as RFC3339.
    ///
    /// Returns `None` when the timestamp is empty or not a valid instant.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.timestamp.trim()).ok()
    }

    /// Serialize the record as a single JSON line (without the newline).
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_negative_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = null_as_default(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "duration_sec must be a non-negative number (got {})",
            value
        )));
    }
    Ok(value)
}
