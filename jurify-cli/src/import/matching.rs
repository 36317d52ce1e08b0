//! Automatic column matching between uploaded headers and an import profile

use std::collections::HashSet;

use super::columns::{ColumnMapping, ColumnSpec};
use super::normalize::normalize_header;

/// Compute the initial mapping from logical columns to file headers.
///
/// Specs are processed in profile order; for each spec the first header
/// (in file order) whose normalized form equals the normalized form of any
/// variant, or of the key itself, wins. A header claimed by an earlier spec
/// is not eligible again, so the result is fully deterministic.
pub fn match_columns(headers: &[String], specs: &[ColumnSpec]) -> ColumnMapping {
    let mut mapping = ColumnMapping::for_specs(specs);
    let mut claimed: HashSet<usize> = HashSet::new();

    for spec in specs {
        // Variants first, the key itself as a last resort
        let wanted: Vec<String> = spec
            .variants
            .iter()
            .map(|v| normalize_header(v))
            .chain(std::iter::once(normalize_header(&spec.key)))
            .collect();

        for (idx, header) in headers.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            let normalized = normalize_header(header);
            if normalized.is_empty() {
                continue;
            }
            if wanted.iter().any(|w| *w == normalized) {
                log::debug!("matched column '{}' to header '{}'", spec.key, header);
                mapping.assign(&spec.key, header);
                claimed.insert(idx);
                break;
            }
        }

        if mapping.header_for(&spec.key).is_none() {
            log::debug!("no header matched column '{}'", spec.key);
        }
    }

    mapping
}
