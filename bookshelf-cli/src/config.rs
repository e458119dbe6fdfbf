//! Configuration for the bookshelf CLI
//!
//! Resolution order (later wins):
//! 1. built-in defaults
//! 2. `~/.bookshelf/config.toml` (or `--config PATH`)
//! 3. environment (`.env` is loaded first)
//! 4. command-line flags

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use bookshelf_server::ServerConfig;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Effective configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub server: ServerSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
    pub request_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        let defaults = ServerConfig::default();
        Self {
            bind: defaults.bind_addr,
            cors_permissive: defaults.cors_permissive,
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ShelfConfig {
    /// Config file path: ~/.bookshelf/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bookshelf")
            .join("config.toml")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path is optional and
    /// falls back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.server.bind,
            cors_permissive: self.server.cors_permissive,
            request_timeout: Duration::from_secs(self.server.request_timeout_secs),
        }
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

pub fn run_config(args: ConfigArgs, config: &ShelfConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", ShelfConfig::config_path().display());
        }
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
