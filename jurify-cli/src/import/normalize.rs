//! Header name normalization for column matching

use deunicode::deunicode;

/// Reduce a raw header string to its comparison key.
///
/// Accents are folded ("Número" -> "numero"), everything that is not an
/// ASCII letter, digit, or space is dropped, and whitespace runs collapse
/// to a single space. Two headers refer to the same column iff their
/// normalized forms are equal.
pub fn normalize_header(raw: &str) -> String {
    deunicode(raw)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_and_case_folding() {
        assert_eq!(
            normalize_header("NÚMERO DO PROCESSO"),
            normalize_header("numero do processo")
        );
        assert_eq!(normalize_header("Publicação"), "publicacao");
    }

    #[test]
    fn test_symbols_stripped_and_whitespace_collapsed() {
        assert_eq!(normalize_header("  ID  da   publicação!  "), "id da publicacao");
        assert_eq!(normalize_header("Nº CNJ"), "no cnj");
        assert_eq!(normalize_header("(Texto)"), "texto");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Número do processo", "  a  b ", "", "¿¡?", "ID_interno"] {
            let once = normalize_header(s);
            assert_eq!(normalize_header(&once), once);
        }
    }

    #[test]
    fn test_total_on_degenerate_input() {
        assert_eq!(normalize_header(""), "");
        assert_eq!(normalize_header("!!!"), "");
        assert_eq!(normalize_header("   "), "");
    }
}
