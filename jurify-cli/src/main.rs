//! jurify-cli entry point

mod api;
mod cli;
mod config;
mod import;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::Cli::parse();
    cli::run(cli).await
}
