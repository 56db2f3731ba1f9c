/// Strips byte-order and zero-width marks and surrounding whitespace from a header cell.
pub(crate) fn normalize_header(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Collapses internal runs of whitespace in a free-text cell.
pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_loses_bom_and_padding() {
        assert_eq!(normalize_header("\u{feff} Registro_ANS "), "Registro_ANS");
    }

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(
            collapse_whitespace("  UNIMED   DO\tBRASIL "),
            "UNIMED DO BRASIL"
        );
    }
}
