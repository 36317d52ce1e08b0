//! Import command handler with interactive mapping confirmation
//!
//! The session state machine lives in `crate::import`; this handler is the
//! dispatcher around it: show the resolved mapping, let the user confirm,
//! edit one column at a time, or abort, and surface every outcome with a
//! distinct message.

use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use dialoguer::Select;

use super::{ImportCommands, ImportTargetCommand};
use crate::api::{ApiSink, ImportTarget, JurifyClient};
use crate::config::Config;
use crate::import::{
    ColumnMapping, ConfirmOutcome, ImportSession, ImportSink, NormalizedRow, report,
    processos_profile, publicacoes_profile,
};

pub async fn handle_import_command(cmd: ImportCommands) -> Result<()> {
    let (target, args, specs) = match cmd.target {
        ImportTargetCommand::Processos(args) => {
            (ImportTarget::Processos, args, processos_profile())
        }
        ImportTargetCommand::Publicacoes(args) => {
            (ImportTarget::Publicacoes, args, publicacoes_profile())
        }
    };

    // Resolve the sink up front so a missing config fails before parsing
    let mut sink = build_sink(target, args.dry_run)?;

    let mut session = ImportSession::new(specs);
    session.load_file(&args.file)?;
    log::debug!("session entered stage '{}'", session.stage().label());

    let row_count = session
        .table()
        .map(|t| t.row_count())
        .unwrap_or_default();
    println!(
        "Loaded {} with {} data rows",
        args.file.display().to_string().cyan(),
        row_count.to_string().bold()
    );

    loop {
        println!();
        print_mapping(&session);
        println!();

        let choice = Select::new()
            .with_prompt(format!("Import {} rows as {}?", row_count, target.label()))
            .items(&["Confirm import", "Edit a column mapping", "Abort"])
            .default(0)
            .interact()?;

        match choice {
            0 => match session.confirm(sink.as_mut()).await {
                Ok(ConfirmOutcome::Completed { submitted }) => {
                    println!(
                        "{} {} rows imported as {}",
                        "Done:".green().bold(),
                        submitted,
                        target.label()
                    );
                    return Ok(());
                }
                Ok(ConfirmOutcome::Invalid) => {
                    print_issues(&session);
                    if let Some(report_path) = &args.report {
                        report::write_issues_csv(session.issues(), report_path)?;
                        println!("Issue report written to {}", report_path.display());
                    }
                }
                Ok(ConfirmOutcome::Rejected) => {
                    println!(
                        "{}",
                        "The server rejected the import. Fix the mapping or the data and try again."
                            .red()
                    );
                }
                Err(e) => {
                    // Session state is preserved, the user can retry
                    println!("{} {:#}", "Submission failed:".red().bold(), e);
                }
            },
            1 => edit_mapping(&mut session)?,
            _ => {
                session.reset();
                println!("Import aborted, nothing was sent.");
                return Ok(());
            }
        }
    }
}

/// Pick the sink: the real API client, or stdout for --dry-run
fn build_sink(target: ImportTarget, dry_run: bool) -> Result<Box<dyn ImportSink>> {
    if dry_run {
        return Ok(Box::new(DryRunSink));
    }
    let config = Config::load()?;
    Ok(Box::new(ApiSink::new(JurifyClient::new(&config.api), target)))
}

/// Sink that prints the normalized rows instead of calling the API
struct DryRunSink;

#[async_trait]
impl ImportSink for DryRunSink {
    async fn submit(&mut self, rows: &[NormalizedRow], _mapping: &ColumnMapping) -> Result<bool> {
        println!("{}", "Dry run, rows that would be submitted:".bold());
        println!("{}", serde_json::to_string_pretty(rows)?);
        Ok(true)
    }
}

fn print_mapping(session: &ImportSession) {
    println!("{}", "Column mapping".bold());
    for spec in session.specs() {
        let marker = if spec.required { "*" } else { " " };
        let assigned = match session.mapping().header_for(&spec.key) {
            Some(header) => format!("{:<28}", header).green(),
            None => format!("{:<28}", "(unmapped)").yellow(),
        };
        // Preview the first data row where the column resolved, the
        // profile's sample value otherwise
        let preview = sample_value(session, &spec.key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(&spec.example);
        println!(
            "  {}{:<10} <- {} e.g. {}",
            marker.red(),
            spec.key,
            assigned,
            truncate(preview, spec.preview_width).dimmed()
        );
    }
}

/// First data-row value behind a logical column, if it resolved
fn sample_value<'a>(session: &'a ImportSession, key: &str) -> Option<&'a str> {
    let table = session.table()?;
    let header = session.mapping().header_for(key)?;
    let idx = table.header_index(header)?;
    table.rows().first().map(|row| row[idx].as_str())
}

fn print_issues(session: &ImportSession) {
    println!(
        "{} {} issue(s) must be fixed before submitting:",
        "Validation failed:".red().bold(),
        session.issues().len()
    );
    for issue in session.issues() {
        println!("  {}", issue);
    }
}

/// Let the user repoint one logical column at a header, or unmap it
fn edit_mapping(session: &mut ImportSession) -> Result<()> {
    let keys: Vec<String> = session.specs().iter().map(|s| s.key.clone()).collect();
    let key_idx = Select::new()
        .with_prompt("Which column?")
        .items(&keys)
        .default(0)
        .interact()?;
    let key = keys[key_idx].clone();

    let headers: Vec<String> = session
        .table()
        .context("No file loaded")?
        .headers()
        .to_vec();
    let mut options: Vec<String> = headers
        .iter()
        .map(|h| {
            if session.mapping().is_claimed(h) {
                format!("{} (already mapped)", h)
            } else {
                h.clone()
            }
        })
        .collect();
    options.push("(leave unmapped)".to_string());

    let header_idx = Select::new()
        .with_prompt(format!("Header for '{}'", key))
        .items(&options)
        .default(0)
        .interact()?;

    if header_idx == headers.len() {
        session.clear(&key)?;
    } else {
        session.assign(&key, &headers[header_idx])?;
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
