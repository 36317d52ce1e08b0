//! Command-line interface for jurify-cli

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::import::ImportCommands;

#[derive(Debug, Parser)]
#[command(
    name = "jurify-cli",
    version,
    about = "Import legal case spreadsheets into Jurify"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a spreadsheet of processos or publicações
    Import(ImportCommands),
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import(args) => commands::import::handle_import_command(args).await,
    }
}
