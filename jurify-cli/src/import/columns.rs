//! Column specifications and the logical-column -> header mapping
//!
//! A `ColumnSpec` describes one logical column an import profile wants to
//! extract from an uploaded spreadsheet, including the header spellings
//! ("variants") it should be recognized under. The built-in profiles mirror
//! the Jurify import flows for processos and publicações.

/// One logical column of an import profile
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Logical column name (unique within a profile), e.g. "Processo"
    pub key: String,
    /// Sample value shown to the user for guidance
    pub example: String,
    /// Display width hint for preview tables
    pub preview_width: usize,
    /// Accepted header spellings, compared in normalized form
    pub variants: Vec<String>,
    /// Whether every row must have a value for this column
    pub required: bool,
}

impl ColumnSpec {
    pub fn new(
        key: &str,
        example: &str,
        preview_width: usize,
        variants: &[&str],
        required: bool,
    ) -> Self {
        Self {
            key: key.to_string(),
            example: example.to_string(),
            preview_width,
            variants: variants.iter().map(|v| v.to_string()).collect(),
            required,
        }
    }

    /// Shorthand for a required column
    pub fn required(key: &str, example: &str, preview_width: usize, variants: &[&str]) -> Self {
        Self::new(key, example, preview_width, variants, true)
    }

    /// Shorthand for an optional column
    pub fn optional(key: &str, example: &str, preview_width: usize, variants: &[&str]) -> Self {
        Self::new(key, example, preview_width, variants, false)
    }
}

/// Resolved association between logical columns and raw file headers.
///
/// Entries are kept in spec order so display and submission are
/// deterministic. Each raw header is held by at most one logical column.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    entries: Vec<(String, Option<String>)>,
}

impl ColumnMapping {
    /// Create an empty mapping with one unassigned entry per spec
    pub fn for_specs(specs: &[ColumnSpec]) -> Self {
        Self {
            entries: specs.iter().map(|s| (s.key.clone(), None)).collect(),
        }
    }

    /// Raw header currently assigned to a logical column
    pub fn header_for(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, h)| h.as_deref())
    }

    /// Whether a raw header is already claimed by some logical column
    pub fn is_claimed(&self, header: &str) -> bool {
        self.entries
            .iter()
            .any(|(_, h)| h.as_deref() == Some(header))
    }

    /// Assign a raw header to a logical column.
    ///
    /// A header can back only one column, so any other column currently
    /// holding it is cleared first.
    pub fn assign(&mut self, key: &str, header: &str) {
        for (k, h) in &mut self.entries {
            if k != key && h.as_deref() == Some(header) {
                *h = None;
            }
        }
        if let Some((_, h)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *h = Some(header.to_string());
        }
    }

    /// Leave a logical column unmapped
    pub fn clear(&mut self, key: &str) {
        if let Some((_, h)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *h = None;
        }
    }

    /// Iterate entries in spec order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, h)| (k.as_str(), h.as_deref()))
    }

    /// Number of columns that resolved to a header
    pub fn assigned_count(&self) -> usize {
        self.entries.iter().filter(|(_, h)| h.is_some()).count()
    }
}

/// Column profile for the processos import flow
pub fn processos_profile() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required(
            "Processo",
            "0001234-56.2024.8.26.0001",
            25,
            &[
                "Processo",
                "Número do processo",
                "Numero processo",
                "Número CNJ",
                "CNJ",
            ],
        ),
        ColumnSpec::required(
            "Texto",
            "Intimação da sentença publicada no DJE...",
            40,
            &[
                "Texto",
                "Texto da publicação",
                "Conteúdo",
                "Publicação",
            ],
        ),
        ColumnSpec::optional(
            "ID",
            "55",
            8,
            &["ID", "ID da publicação", "ID publicação", "ID interno"],
        ),
    ]
}

/// Column profile for the publicações import flow
pub fn publicacoes_profile() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::required(
            "ID",
            "55",
            8,
            &["ID", "ID da publicação", "ID publicação", "ID interno"],
        ),
        ColumnSpec::required(
            "Texto",
            "Intimação da sentença publicada no DJE...",
            40,
            &[
                "Texto",
                "Texto da publicação",
                "Conteúdo",
                "Publicação",
            ],
        ),
        ColumnSpec::optional(
            "Processo",
            "0001234-56.2024.8.26.0001",
            25,
            &[
                "Processo",
                "Número do processo",
                "Numero processo",
                "Número CNJ",
                "CNJ",
            ],
        ),
        ColumnSpec::optional(
            "Data",
            "2024-03-18",
            12,
            &[
                "Data",
                "Data da publicação",
                "Data publicação",
                "Data de disponibilização",
            ],
        ),
    ]
}
