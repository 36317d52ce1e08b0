//! CSV decoding

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::table_from_grid;
use crate::import::table::UploadedTable;

/// Read a CSV file into a table
pub fn read_table(path: &Path) -> Result<UploadedTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_from(file).with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

/// Read CSV from any source. Ragged rows are accepted here; alignment to
/// the header width happens when the table is assembled.
fn read_from<R: Read>(reader: R) -> Result<UploadedTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record.context("Failed to decode CSV record")?;
        grid.push(record.iter().map(|c| c.to_string()).collect());
    }

    table_from_grid(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_headers_and_rows() {
        let data = "Número do processo,Texto,ID da publicação\n\
                    0001234-56.2024.8.26.0001,\"Texto de teste\",55\n";
        let table = read_from(Cursor::new(data)).unwrap();

        assert_eq!(
            table.headers(),
            &[
                "Número do processo".to_string(),
                "Texto".to_string(),
                "ID da publicação".to_string()
            ]
        );
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(0, "Texto"), Some("Texto de teste"));
        assert_eq!(table.value(0, "ID da publicação"), Some("55"));
    }

    #[test]
    fn test_ragged_rows_are_aligned() {
        let data = "A,B,C\n1\n2,3,4,5\n";
        let table = read_from(Cursor::new(data)).unwrap();

        assert_eq!(table.value(0, "B"), Some(""));
        assert_eq!(table.value(1, "C"), Some("4"));
        assert_eq!(table.rows()[1].len(), 3);
    }

    #[test]
    fn test_empty_input_is_a_parse_error() {
        assert!(read_from(Cursor::new("")).is_err());
    }

    #[test]
    fn test_header_only_input_is_a_parse_error() {
        assert!(read_from(Cursor::new("A,B,C\n")).is_err());
    }
}
