//! Turning a finished command run into a [`BuildMetric`].

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

use crate::git::{GitInfo, UNKNOWN};
use crate::metrics::BuildMetric;
use crate::runner::RunOutcome;
use crate::system::Environment;

/// Outcome label stored in a record's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Failure,
    Interrupted,
}

impl BuildStatus {
    /// An interrupted run is `Interrupted` whatever its exit code.
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        if outcome.interrupted {
            BuildStatus::Interrupted
        } else if outcome.exit_code == 0 {
            BuildStatus::Success
        } else {
            BuildStatus::Failure
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Success => "success",
            BuildStatus::Failure => "failure",
            BuildStatus::Interrupted => "interrupted",
        }
    }
}

/// Machine and user the build ran on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub user: String,
    pub hostname: String,
    pub os: String,
    pub cpus: u32,
}

impl HostInfo {
    /// Collect host details, reading the user name through `env`.
    pub fn detect(env: &dyn Environment) -> Self {
        let user = env
            .var("USER")
            .or_else(|| env.var("USERNAME"))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(1);
        Self {
            user,
            hostname: hostname(env).unwrap_or_default(),
            os: std::env::consts::OS.to_string(),
            cpus,
        }
    }
}

#[cfg(unix)]
fn hostname(_env: &dyn Environment) -> Option<String> {
    let mut buf = [0u8; 256];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return None;
    }
    let len = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..len]).into_owned();
    (!name.is_empty()).then_some(name)
}

#[cfg(not(unix))]
fn hostname(env: &dyn Environment) -> Option<String> {
    env.var("COMPUTERNAME")
}

/// Current local time, as stored in record timestamps.
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Command line as stored in the `command` field: `[prog arg1 arg2]`.
pub fn command_text(argv: &[String]) -> String {
    format!("[{}]", argv.join(" "))
}

/// Assemble the record for one run.
pub fn build_metric(
    argv: &[String],
    outcome: &RunOutcome,
    host: &HostInfo,
    git: &GitInfo,
    finished_at: DateTime<FixedOffset>,
) -> BuildMetric {
    BuildMetric {
        timestamp: finished_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        user: host.user.clone(),
        hostname: host.hostname.clone(),
        os: host.os.clone(),
        project: git.project.clone(),
        branch: git.branch.clone(),
        commit: git.commit.clone(),
        command: command_text(argv),
        duration_sec: outcome.duration_secs(),
        return_code: i64::from(outcome.exit_code),
        cpus: i64::from(host.cpus),
        status: BuildStatus::from_outcome(outcome).as_str().to_string(),
    }
}
