//! bookshelf CLI - runs the in-memory bookshelf HTTP server
//!
//! - `serve`: start the HTTP API (books CRUD + health)
//! - `config`: inspect configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::ShelfConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "bookshelf",
    author,
    version,
    about = "In-memory bookshelf record manager over HTTP"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.bookshelf/config.toml)
    #[arg(long, short = 'c', global = true, env = "BOOKSHELF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Inspect bookshelf configuration (path, show)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = ShelfConfig::load(cli.config.as_deref())?;

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        default_level: settings.log.level.clone(),
    })
    .ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &settings).await?,
        Commands::Config(args) => config::run_config(args, &settings)?,
    }
    Ok(())
}
