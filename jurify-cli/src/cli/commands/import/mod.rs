//! Import command: spreadsheet upload into the Jurify backend

pub mod handler;

use std::path::PathBuf;

use clap::{Args, Subcommand};

pub use handler::handle_import_command;

#[derive(Debug, Args)]
pub struct ImportCommands {
    #[command(subcommand)]
    pub target: ImportTargetCommand,
}

/// Which kind of records the spreadsheet contains
#[derive(Debug, Subcommand)]
pub enum ImportTargetCommand {
    /// Import legal cases (processos)
    Processos(ImportArgs),
    /// Import court publications (publicações)
    Publicacoes(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Spreadsheet to import (.xlsx, .xls or .csv)
    pub file: PathBuf,

    /// Print the normalized rows instead of calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Also write validation issues to a CSV report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}
