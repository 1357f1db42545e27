//! Gen Library command-line client
//!
//! Talks to the image backend over REST, keeps the local NSFW preference and
//! runs the development proxy server.

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use library_client::{Config, LibraryClientModule};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(api_base) = cli.api_base {
        config.api_base_url = api_base;
    }
    if let Command::Serve(args) = &cli.command {
        commands::apply_serve_args(&mut config, args);
    }

    let module = LibraryClientModule::init(config)?;
    commands::handle_command(&module, cli.command).await
}
