//! Git metadata of the working directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Placeholder for metadata that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Branch, short commit and project name of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    pub branch: String,
    pub commit: String,
    /// Base name of the repository top-level directory
    pub project: String,
}

impl Default for GitInfo {
    fn default() -> Self {
        Self {
            branch: UNKNOWN.to_string(),
            commit: UNKNOWN.to_string(),
            project: UNKNOWN.to_string(),
        }
    }
}

/// Source of [`GitInfo`]. Never fails; missing values are [`UNKNOWN`].
pub trait GitProbe {
    fn info(&self) -> GitInfo;
}

/// Queries the `git` executable in a directory.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    dir: Option<PathBuf>,
}

impl GitCli {
    /// Probe the current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `dir` instead of the current working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    fn rev_parse(&self, args: &[&str]) -> Option<String> {
        let mut command = Command::new("git");
        command.arg("rev-parse").args(args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        let output = match command.output() {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "git not available");
                return None;
            }
        };
        if !output.status.success() {
            return None;
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!value.is_empty()).then_some(value)
    }
}

impl GitProbe for GitCli {
    fn info(&self) -> GitInfo {
        let branch = self.rev_parse(&["--abbrev-ref", "HEAD"]);
        let commit = self.rev_parse(&["--short", "HEAD"]);
        let project = self
            .rev_parse(&["--show-toplevel"])
            .and_then(|top| project_name(Path::new(&top)));

        GitInfo {
            branch: branch.unwrap_or_else(|| UNKNOWN.to_string()),
            commit: commit.unwrap_or_else(|| UNKNOWN.to_string()),
            project: project.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

fn project_name(top_level: &Path) -> Option<String> {
    top_level
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
