//! Row validation against an import profile
//!
//! Validation never fails: every problem is reported as data so the whole
//! set can be surfaced to the user at once.

use std::fmt;

use super::columns::{ColumnMapping, ColumnSpec};
use super::table::UploadedTable;

/// What went wrong with a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A required column is unmapped, or its cell is empty/whitespace
    MissingRequiredValue,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingRequiredValue => "missing required value",
        }
    }
}

/// One validation problem, addressed by data row and logical column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Zero-based index into the data rows (row 0 is the first row below
    /// the header)
    pub row_index: usize,
    /// Logical column key the issue belongs to
    pub key: String,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {}: {} for column '{}'",
            self.row_index + 1,
            self.kind.label(),
            self.key
        )
    }
}

/// Check every data row against the required columns of the profile
pub fn validate_table(
    table: &UploadedTable,
    mapping: &ColumnMapping,
    specs: &[ColumnSpec],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for spec in specs.iter().filter(|s| s.required) {
        let header = mapping.header_for(&spec.key);
        for row_index in 0..table.row_count() {
            let value = header.and_then(|h| table.value(row_index, h));
            let missing = match value {
                Some(v) => v.trim().is_empty(),
                None => true,
            };
            if missing {
                issues.push(ValidationIssue {
                    row_index,
                    key: spec.key.clone(),
                    kind: IssueKind::MissingRequiredValue,
                });
            }
        }
    }

    // Report in row order, column order second
    issues.sort_by(|a, b| a.row_index.cmp(&b.row_index).then_with(|| {
        let pos = |key: &str| specs.iter().position(|s| s.key == key);
        pos(&a.key).cmp(&pos(&b.key))
    }));

    issues
}
