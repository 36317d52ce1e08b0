//! Spreadsheet import pipeline
//!
//! Turns an uploaded xlsx/xls/csv file into normalized row objects: parse
//! into a header-aligned grid, auto-match headers against an import
//! profile, let the user review the mapping, validate required columns,
//! and hand the relabeled rows to a caller-supplied sink.

pub mod columns;
pub mod matching;
pub mod normalize;
pub mod parse;
pub mod report;
pub mod session;
pub mod table;
pub mod validate;

pub use columns::{ColumnMapping, ColumnSpec, processos_profile, publicacoes_profile};
pub use matching::match_columns;
pub use parse::{FileKind, parse_file};
pub use session::{ConfirmOutcome, ImportSession, ImportSink, NormalizedRow, Stage};
pub use table::UploadedTable;
pub use validate::{IssueKind, ValidationIssue, validate_table};
