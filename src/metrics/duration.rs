//! Duration display units and formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit used to display a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DurationUnit {
    /// Pick seconds, minutes or hours per value
    #[default]
    Auto,
    Seconds,
    Minutes,
    Hours,
}

/// Unrecognized unit token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid unit: {0:?} (use auto|s|min|h)")]
pub struct InvalidUnitError(pub String);

impl DurationUnit {
    /// Short label: `s`, `min`, `h`, or `auto`.
    pub fn label(&self) -> &'static str {
        match self {
            DurationUnit::Auto => "auto",
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "min",
            DurationUnit::Hours => "h",
        }
    }

    /// Resolve `Auto` for a concrete value; other units are returned as-is.
    ///
    /// Below 60 seconds uses seconds, below 3600 uses minutes, otherwise hours.
    pub fn resolve(self, seconds: f64) -> DurationUnit {
        match self {
            DurationUnit::Auto if seconds >= 3600.0 => DurationUnit::Hours,
            DurationUnit::Auto if seconds >= 60.0 => DurationUnit::Minutes,
            DurationUnit::Auto => DurationUnit::Seconds,
            unit => unit,
        }
    }
}

impl FromStr for DurationUnit {
    type Err = InvalidUnitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(DurationUnit::Auto),
            "s" | "sec" | "secs" | "second" | "seconds" | "seg" | "segundos" => {
                Ok(DurationUnit::Seconds)
            }
            "m" | "min" | "mins" | "minute" | "minutes" | "minutos" => Ok(DurationUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" | "horas" => Ok(DurationUnit::Hours),
            _ => Err(InvalidUnitError(value.to_string())),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for DurationUnit {
    type Error = InvalidUnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationUnit> for String {
    fn from(unit: DurationUnit) -> Self {
        unit.label().to_string()
    }
}

/// Format `seconds` for display in `unit`.
///
/// - seconds: one decimal place, `" s"` appended when `include_unit` is set
/// - minutes: rounded to the whole second, `<m>min<ss>s`
/// - hours: rounded to the whole minute, `<h>h<mm>min`
///
/// Minutes and hours embed their unit, so `include_unit` only affects seconds.
pub fn format_duration(seconds: f64, unit: DurationUnit, include_unit: bool) -> String {
    match unit.resolve(seconds) {
        DurationUnit::Minutes => {
            let total_seconds = seconds.round() as i64;
            format!("{}min{:02}s", total_seconds / 60, total_seconds % 60)
        }
        DurationUnit::Hours => {
            let total_minutes = (seconds / 60.0).round() as i64;
            format!("{}h{:02}min", total_minutes / 60, total_minutes % 60)
        }
        _ => {
            if include_unit {
                format!("{:.1} s", seconds)
            } else {
                format!("{:.1}", seconds)
            }
        }
    }
}
