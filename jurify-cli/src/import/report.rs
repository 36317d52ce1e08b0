//! CSV report of validation issues

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use super::validate::ValidationIssue;

/// Write the issues of the last confirm attempt to a CSV file
pub fn write_issues_csv(issues: &[ValidationIssue], path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;

    wtr.write_record(["Row", "Column", "Problem"])
        .context("Failed to write report header")?;

    for issue in issues {
        wtr.write_record([
            (issue.row_index + 1).to_string(),
            issue.key.clone(),
            issue.kind.label().to_string(),
        ])
        .with_context(|| format!("Failed to write report row for '{}'", issue.key))?;
    }

    wtr.flush().context("Failed to flush report file")?;

    log::info!("issue report written to {}", path.display());
    Ok(())
}
