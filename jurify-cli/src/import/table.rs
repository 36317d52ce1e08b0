//! In-memory representation of a parsed spreadsheet

/// A parsed spreadsheet: one header row plus the data rows beneath it.
///
/// Rows are stored positionally aligned to the headers: short rows are
/// padded with empty strings, excess trailing cells are dropped. Row order
/// is preserved from the source file.
#[derive(Debug, Clone)]
pub struct UploadedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl UploadedTable {
    /// Build a table from a raw cell grid, aligning every row to the headers
    pub fn new(headers: Vec<String>, raw_rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = raw_rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a raw header (first occurrence wins for duplicates)
    pub fn header_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell value at (data row, raw header)
    pub fn value(&self, row: usize, header: &str) -> Option<&str> {
        let idx = self.header_index(header)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }
}
