//! CLI definitions for BMT
//!
//! The clap structure lives in the library so tests can inspect the command
//! table without spawning the binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use crate::metrics::DurationUnit;
use crate::view::ReportFormat;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "bmt")]
#[command(about = "[ Build Metrics Tool ] - measure builds and report where the time goes")]
#[command(
    long_about = "Build Metrics Tool (BMT) - measure build commands and report on them.

Every measured build is appended as one JSON line to the build log
(~/.local/share/build-metrics/build_log.jsonl by default, or $BUILD_METRICS_LOG).
Reports aggregate the log per project and ISO week.

QUICK START:
    bmt run cargo build --release     Measure a build
    bmt report                        Weekly totals per project
    bmt report --since 2024-01-01     Only builds since a date
    bmt export --out builds.csv       Export the log as CSV"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Log file override shared by all log-reading commands.
#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
    /// Path to the build log (overrides $BUILD_METRICS_LOG and the config)
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a command and record how long it took
    #[command(
        visible_aliases = ["exec", "r"],
        long_about = "Run a command, forwarding its input and output, and append a build
record with its duration, exit code and git metadata to the build log.

The exit code of the command becomes the exit code of bmt. Ctrl+C stops the
command and records it as interrupted.

EXAMPLES:
    bmt run make -j8
    bmt run --log /tmp/builds.jsonl cargo test
    bmt r -- ./build.sh --clean"
    )]
    Run {
        #[command(flatten)]
        log: LogArgs,
        /// Command to run, followed by its arguments
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<String>,
    },

    /// Show weekly build time per project
    #[command(long_about = "Aggregate the build log per project and ISO week.

Dates are calendar days in the local timezone; both bounds are inclusive
of the instant they name (local midnight).

EXAMPLES:
    bmt report
    bmt report --since 2024-01-01 --until 2024-03-31
    bmt report --unit min
    bmt report --format json")]
    Report {
        #[command(flatten)]
        log: LogArgs,
        /// Only builds at or after local midnight of this day
        #[arg(long, value_name = "YYYY-MM-DD")]
        since: Option<NaiveDate>,
        /// Only builds at or before local midnight of this day
        #[arg(long, value_name = "YYYY-MM-DD")]
        until: Option<NaiveDate>,
        /// Unit for totals: auto, s, min or h (default from config)
        #[arg(long, value_name = "UNIT")]
        unit: Option<DurationUnit>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },

    /// Export the build log as CSV
    #[command(long_about = "Write the build log as CSV with a fixed header.

Malformed lines are skipped unless --strict is given (or [export] strict
is set), in which case the first one aborts the export.

EXAMPLES:
    bmt export > builds.csv
    bmt export --out reports/builds.csv --strict")]
    Export {
        #[command(flatten)]
        log: LogArgs,
        /// Output file, '-' for stdout
        #[arg(long, short, value_name = "PATH")]
        out: Option<PathBuf>,
        /// Abort on the first malformed line
        #[arg(long)]
        strict: bool,
    },

    /// Show version and log location
    #[command(visible_aliases = ["version", "v"])]
    Info {
        #[command(flatten)]
        log: LogArgs,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Values missing from ~/.config/bmt/config.toml are shown with their defaults.

EXAMPLE:
    bmt config show")]
    Show,
    /// Print the configuration file path
    Path,
}
