//! File parsing: dispatch on extension into a normalized cell grid

mod csv;
mod excel;

use std::path::Path;

use anyhow::{Result, bail};

use super::table::UploadedTable;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xlsx,
    Xls,
    Csv,
}

impl FileKind {
    /// Detect the format from the file extension.
    ///
    /// Anything outside xlsx/xls/csv is rejected here, before any bytes
    /// are read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            "csv" => Ok(Self::Csv),
            "" => bail!(
                "File has no extension: {} (expected .xlsx, .xls or .csv)",
                path.display()
            ),
            other => bail!(
                "Unsupported file type '.{}': {} (expected .xlsx, .xls or .csv)",
                other,
                path.display()
            ),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Xlsx => "Excel (xlsx)",
            Self::Xls => "Excel (xls)",
            Self::Csv => "CSV",
        }
    }
}

/// Parse an uploaded file into headers plus data rows
pub fn parse_file(path: &Path, kind: FileKind) -> Result<UploadedTable> {
    match kind {
        FileKind::Xlsx | FileKind::Xls => excel::read_table(path),
        FileKind::Csv => csv::read_table(path),
    }
}

/// Assemble a raw cell grid into a table: row 1 becomes the headers,
/// fully empty data rows are dropped.
fn table_from_grid(mut grid: Vec<Vec<String>>) -> Result<UploadedTable> {
    if grid.is_empty() {
        bail!("File is empty, no header row found");
    }
    let headers = grid.remove(0);

    let rows: Vec<Vec<String>> = grid
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .collect();

    if rows.is_empty() {
        bail!("File has no data rows after the header");
    }

    Ok(UploadedTable::new(headers, rows))
}
