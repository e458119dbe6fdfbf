//! HTTP server command

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use bookshelf_server::{run_server, ServerConfig};

use crate::config::ShelfConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (overrides config)
    #[arg(long, short = 'b', env = "BOOKSHELF_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ServeArgs {
    /// Layer flags over the loaded configuration.
    pub fn resolve(&self, config: &ShelfConfig) -> ServerConfig {
        let mut server = config.server_config();
        if let Some(bind) = self.bind {
            server.bind_addr = bind;
        }
        if self.cors_permissive {
            server.cors_permissive = true;
        }
        if let Some(secs) = self.timeout {
            server.request_timeout = Duration::from_secs(secs);
        }
        server
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &ShelfConfig) -> Result<()> {
    let server = args.resolve(config);
    tracing::info!("Starting bookshelf server on {}", server.bind_addr);

    // Run server (blocks until shutdown)
    run_server(server).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config = ShelfConfig::default();
        let args = ServeArgs {
            bind: Some("0.0.0.0:8080".parse().unwrap()),
            cors_permissive: true,
            timeout: Some(3),
        };

        let server = args.resolve(&config);
        assert_eq!(server.bind_addr.port(), 8080);
        assert!(server.cors_permissive);
        assert_eq!(server.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn config_used_without_flags() {
        let mut config = ShelfConfig::default();
        config.server.bind = "127.0.0.1:7070".parse().unwrap();

        let server = ServeArgs::default().resolve(&config);
        assert_eq!(server.bind_addr.port(), 7070);
        assert!(!server.cors_permissive);
    }
}
