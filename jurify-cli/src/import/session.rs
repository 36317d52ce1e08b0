//! Import session state machine
//!
//! One session covers one uploaded file: parse, auto-match, user review,
//! validation, submission. The session owns all in-memory state and talks
//! to the outside world only through an [`ImportSink`], so the interactive
//! layer stays a thin dispatcher.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use super::columns::{ColumnMapping, ColumnSpec};
use super::matching::match_columns;
use super::parse::{FileKind, parse_file};
use super::table::UploadedTable;
use super::validate::{ValidationIssue, validate_table};

/// A data row relabeled from raw headers to logical column keys
pub type NormalizedRow = HashMap<String, String>;

/// Receiver of the confirmed import. Returning `Ok(false)` means the
/// receiver rejected the data and the user should correct and resubmit.
#[async_trait]
pub trait ImportSink {
    async fn submit(&mut self, rows: &[NormalizedRow], mapping: &ColumnMapping) -> Result<bool>;
}

/// Where the session currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    FileSelected,
    AutoMatched,
    AwaitingConfirmation,
    Validating,
    ReadyToSubmit,
    Submitting,
    Completed,
    Failed,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Waiting for a file",
            Self::FileSelected => "File selected",
            Self::AutoMatched => "Columns matched",
            Self::AwaitingConfirmation => "Awaiting confirmation",
            Self::Validating => "Validating rows",
            Self::ReadyToSubmit => "Ready to submit",
            Self::Submitting => "Submitting",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

/// Outcome of a confirm action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Validation found issues; session stays at AwaitingConfirmation
    Invalid,
    /// The sink rejected the rows; session stays at AwaitingConfirmation
    Rejected,
    /// All rows submitted and accepted
    Completed { submitted: usize },
}

/// State for one spreadsheet import, from file selection to submission
#[derive(Default)]
pub struct ImportSession {
    specs: Vec<ColumnSpec>,
    stage: Stage,
    source: Option<PathBuf>,
    table: Option<UploadedTable>,
    mapping: ColumnMapping,
    issues: Vec<ValidationIssue>,
}

impl ImportSession {
    pub fn new(specs: Vec<ColumnSpec>) -> Self {
        Self {
            mapping: ColumnMapping::for_specs(&specs),
            specs,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn table(&self) -> Option<&UploadedTable> {
        self.table.as_ref()
    }

    /// Issues from the most recent confirm attempt
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Select and parse a file, then auto-match its headers.
    ///
    /// An unsupported extension leaves the session at `Idle`; a parse
    /// failure moves it to `Failed` (the session must be reset with a new
    /// file). On success the session always pauses at
    /// `AwaitingConfirmation`, even when every column matched: bulk
    /// creation is destructive, so a human confirms the mapping first.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        if self.stage != Stage::Idle {
            bail!("A file is already loaded; reset the session first");
        }

        let kind = FileKind::from_path(path)?;
        self.stage = Stage::FileSelected;
        self.source = Some(path.to_path_buf());

        let table = match parse_file(path, kind) {
            Ok(table) => table,
            Err(e) => {
                self.stage = Stage::Failed;
                return Err(e);
            }
        };

        self.mapping = match_columns(table.headers(), &self.specs);
        self.stage = Stage::AutoMatched;
        log::info!(
            "loaded {} ({}): {} rows, {}/{} columns matched",
            path.display(),
            kind.label(),
            table.row_count(),
            self.mapping.assigned_count(),
            self.specs.len()
        );

        self.table = Some(table);
        self.stage = Stage::AwaitingConfirmation;
        Ok(())
    }

    /// Point a logical column at a different header during review
    pub fn assign(&mut self, key: &str, header: &str) -> Result<()> {
        self.ensure_reviewing()?;
        let table = self.table.as_ref().expect("table present while reviewing");
        if table.header_index(header).is_none() {
            bail!("File has no column named '{}'", header);
        }
        if !self.specs.iter().any(|s| s.key == key) {
            bail!("Unknown import column '{}'", key);
        }
        self.mapping.assign(key, header);
        Ok(())
    }

    /// Leave a logical column unmapped during review
    pub fn clear(&mut self, key: &str) -> Result<()> {
        self.ensure_reviewing()?;
        self.mapping.clear(key);
        Ok(())
    }

    /// Validate every row, and when clean hand the normalized rows to the
    /// sink. Exactly one submission attempt per call; on rejection or sink
    /// failure the session returns to `AwaitingConfirmation` with the
    /// parsed rows and mapping intact so the user can retry.
    pub async fn confirm(&mut self, sink: &mut dyn ImportSink) -> Result<ConfirmOutcome> {
        self.ensure_reviewing()?;

        self.stage = Stage::Validating;
        let table = self.table.as_ref().expect("table present while reviewing");
        self.issues = validate_table(table, &self.mapping, &self.specs);
        if !self.issues.is_empty() {
            log::info!("validation found {} issue(s)", self.issues.len());
            self.stage = Stage::AwaitingConfirmation;
            return Ok(ConfirmOutcome::Invalid);
        }

        self.stage = Stage::ReadyToSubmit;
        let rows = self.normalized_rows();

        self.stage = Stage::Submitting;
        match sink.submit(&rows, &self.mapping).await {
            Ok(true) => {
                if let Some(source) = &self.source {
                    log::info!("import completed: {} rows from {}", rows.len(), source.display());
                }
                self.stage = Stage::Completed;
                Ok(ConfirmOutcome::Completed {
                    submitted: rows.len(),
                })
            }
            Ok(false) => {
                log::warn!("import rejected by receiver, keeping session for retry");
                self.stage = Stage::AwaitingConfirmation;
                Ok(ConfirmOutcome::Rejected)
            }
            Err(e) => {
                log::error!("import submission failed: {:#}", e);
                self.stage = Stage::AwaitingConfirmation;
                Err(e).context("Submission failed")
            }
        }
    }

    /// Discard all session state and return to `Idle`
    pub fn reset(&mut self) {
        self.stage = Stage::Idle;
        self.source = None;
        self.table = None;
        self.mapping = ColumnMapping::for_specs(&self.specs);
        self.issues.clear();
    }

    /// Data rows relabeled from raw headers to logical keys, in file order.
    /// Unmapped columns are simply absent from the output rows.
    fn normalized_rows(&self) -> Vec<NormalizedRow> {
        let table = match &self.table {
            Some(table) => table,
            None => return Vec::new(),
        };

        (0..table.row_count())
            .map(|row_index| {
                self.mapping
                    .iter()
                    .filter_map(|(key, header)| {
                        let value = table.value(row_index, header?)?;
                        Some((key.to_string(), value.to_string()))
                    })
                    .collect()
            })
            .collect()
    }

    fn ensure_reviewing(&self) -> Result<()> {
        if self.stage != Stage::AwaitingConfirmation {
            bail!(
                "Session is not awaiting confirmation (current state: {})",
                self.stage.label()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::columns::processos_profile;

    /// Sink that replays scripted results and records what it received
    struct ScriptedSink {
        results: Vec<Result<bool>>,
        calls: Vec<Vec<NormalizedRow>>,
    }

    impl ScriptedSink {
        fn new(results: Vec<Result<bool>>) -> Self {
            Self {
                results,
                calls: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl ImportSink for ScriptedSink {
        async fn submit(
            &mut self,
            rows: &[NormalizedRow],
            _mapping: &ColumnMapping,
        ) -> Result<bool> {
            self.calls.push(rows.to_vec());
            self.results.remove(0)
        }
    }

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("jurify_session_{}.csv", name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    const SCENARIO: &str = "Número do processo,Texto,ID da publicação\n\
                            0001234-56.2024.8.26.0001,\"Texto de teste\",55\n";

    #[test]
    fn test_unsupported_extension_keeps_session_idle() {
        let mut session = ImportSession::new(processos_profile());
        let err = session.load_file(Path::new("dados.pdf")).unwrap_err();

        assert!(err.to_string().contains("Unsupported file type"));
        assert_eq!(session.stage(), Stage::Idle);
    }

    #[test]
    fn test_parse_failure_moves_session_to_failed() {
        let path = write_temp_csv("empty", "");
        let mut session = ImportSession::new(processos_profile());

        assert!(session.load_file(&path).is_err());
        assert_eq!(session.stage(), Stage::Failed);

        session.reset();
        assert_eq!(session.stage(), Stage::Idle);
    }

    #[test]
    fn test_perfect_match_still_pauses_for_confirmation() {
        let path = write_temp_csv("pause", SCENARIO);
        let mut session = ImportSession::new(processos_profile());
        session.load_file(&path).unwrap();

        // Every column resolved, yet nothing was submitted
        assert_eq!(session.mapping().assigned_count(), 3);
        assert_eq!(session.stage(), Stage::AwaitingConfirmation);
    }

    #[tokio::test]
    async fn test_required_issue_blocks_submission() {
        let csv = "Número do processo,Texto\n0001234,   \n";
        let path = write_temp_csv("gating", csv);
        let mut session = ImportSession::new(processos_profile());
        session.load_file(&path).unwrap();

        let mut sink = ScriptedSink::new(vec![Ok(true)]);
        let outcome = session.confirm(&mut sink).await.unwrap();

        assert_eq!(outcome, ConfirmOutcome::Invalid);
        assert_eq!(session.stage(), Stage::AwaitingConfirmation);
        assert_eq!(session.issues().len(), 1);
        assert_eq!(session.issues()[0].key, "Texto");
        assert!(sink.calls.is_empty());
    }

    #[tokio::test]
    async fn test_rejection_preserves_rows_for_retry() {
        let path = write_temp_csv("retry", SCENARIO);
        let mut session = ImportSession::new(processos_profile());
        session.load_file(&path).unwrap();

        let mut sink = ScriptedSink::new(vec![Ok(false), Ok(true)]);

        let first = session.confirm(&mut sink).await.unwrap();
        assert_eq!(first, ConfirmOutcome::Rejected);
        assert_eq!(session.stage(), Stage::AwaitingConfirmation);

        let second = session.confirm(&mut sink).await.unwrap();
        assert_eq!(second, ConfirmOutcome::Completed { submitted: 1 });
        assert_eq!(session.stage(), Stage::Completed);

        // Same rows on both attempts, one sink call per confirm
        assert_eq!(sink.calls.len(), 2);
        assert_eq!(sink.calls[0], sink.calls[1]);
    }

    #[tokio::test]
    async fn test_sink_error_returns_session_to_review() {
        let path = write_temp_csv("sink_err", SCENARIO);
        let mut session = ImportSession::new(processos_profile());
        session.load_file(&path).unwrap();

        let mut sink = ScriptedSink::new(vec![Err(anyhow::anyhow!("connection refused"))]);
        assert!(session.confirm(&mut sink).await.is_err());
        assert_eq!(session.stage(), Stage::AwaitingConfirmation);
        assert!(session.table().is_some());
    }

    #[tokio::test]
    async fn test_end_to_end_scenario_rows_relabeled() {
        let path = write_temp_csv("e2e", SCENARIO);
        let mut session = ImportSession::new(processos_profile());
        session.load_file(&path).unwrap();

        assert_eq!(
            session.mapping().header_for("Processo"),
            Some("Número do processo")
        );
        assert_eq!(session.mapping().header_for("Texto"), Some("Texto"));
        assert_eq!(session.mapping().header_for("ID"), Some("ID da publicação"));

        let mut sink = ScriptedSink::new(vec![Ok(true)]);
        let outcome = session.confirm(&mut sink).await.unwrap();
        assert_eq!(outcome, ConfirmOutcome::Completed { submitted: 1 });

        let expected: NormalizedRow = [
            ("Processo", "0001234-56.2024.8.26.0001"),
            ("Texto", "Texto de teste"),
            ("ID", "55"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(sink.calls, vec![vec![expected]]);
    }

    #[tokio::test]
    async fn test_mapping_edits_flow_into_submission() {
        let csv = "Coluna A,Texto,ID\nvalor,texto,1\n";
        let path = write_temp_csv("edits", csv);
        let mut session = ImportSession::new(processos_profile());
        session.load_file(&path).unwrap();

        // "Coluna A" matches nothing; the user points Processo at it
        assert_eq!(session.mapping().header_for("Processo"), None);
        session.assign("Processo", "Coluna A").unwrap();
        assert!(session.assign("Processo", "Inexistente").is_err());

        let mut sink = ScriptedSink::new(vec![Ok(true)]);
        session.confirm(&mut sink).await.unwrap();
        assert_eq!(sink.calls[0][0].get("Processo").map(String::as_str), Some("valor"));
    }
}
