//! Configuration management for BMT

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::PathBuf;

use crate::system::{Environment, FileSystem, OsEnvironment, OsFileSystem};

impl Config {
    /// Get the config file path (~/.config/bmt/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path(&OsEnvironment)
    }

    /// Config file path as seen through `env`
    pub fn config_path_in(env: &dyn Environment) -> Result<PathBuf> {
        io::config_path(env)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load(&OsEnvironment, &OsFileSystem)
    }

    /// Load configuration through the given ports
    pub fn load_from(env: &dyn Environment, fs: &dyn FileSystem) -> Result<Self> {
        io::load(env, fs)
    }

    /// Parse a config document without touching the filesystem
    pub fn from_toml(contents: &str) -> Result<Self> {
        io::parse(contents)
    }

    /// Configured log path with `~/` expanded against `env`'s home directory.
    pub fn log_path(&self, env: &dyn Environment) -> Option<PathBuf> {
        let path = self.log.path.as_deref()?.trim();
        if path.is_empty() {
            return None;
        }
        if let Some(stripped) = path.strip_prefix("~/") {
            if let Some(home) = env.home_dir() {
                return Some(home.join(stripped));
            }
        }
        Some(PathBuf::from(path))
    }
}
