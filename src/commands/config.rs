//! Config subcommands handler

use anyhow::Result;

use bmt::Config;

/// Show the effective configuration as TOML, preceded by its file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;
    println!("{}", render(&config, &path.display().to_string())?);
    Ok(())
}

/// Print the configuration file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

fn render(config: &Config, path: &str) -> Result<String> {
    let body = toml::to_string_pretty(config)?;
    Ok(format!("# {}\n{}", path, body.trim_end()))
}
