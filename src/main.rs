//! Build Metrics Tool (BMT) - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bmt::cli::{Cli, Commands, ConfigCommands};

/// Environment variable holding the log filter (e.g. `debug`, `bmt=trace`).
const LOG_ENV: &str = "BMT_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { log, command } => {
            let code = commands::run::handle(log.log.as_deref(), &command)?;
            std::process::exit(code);
        }
        Commands::Report {
            log,
            since,
            until,
            unit,
            format,
        } => commands::report::handle(log.log.as_deref(), since, until, unit, format),
        Commands::Export { log, out, strict } => {
            commands::export::handle(log.log.as_deref(), out.as_deref(), strict)
        }
        Commands::Info { log } => commands::info::handle(log.log.as_deref()),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
