/// Normalizes raw player input for answer comparison: surrounding
/// whitespace stripped, then Unicode-lowercased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Renders a word-length hint without revealing the word, e.g. "_ _ _".
pub fn masked_hint(word: &str) -> String {
    let blanks: Vec<&str> = word.chars().map(|_| "_").collect();
    blanks.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize("  om1  "), "om1");
        assert_eq!(normalize("\tapi\n"), "api");
    }

    #[test]
    fn test_normalize_case_folds() {
        assert_eq!(normalize("OM1"), "om1");
        assert_eq!(normalize("Fabric"), "fabric");
        assert_eq!(normalize(" SDK "), "sdk");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_preserves_inner_whitespace() {
        assert_eq!(normalize(" two words "), "two words");
    }

    #[test]
    fn test_masked_hint() {
        assert_eq!(masked_hint("OM1"), "_ _ _");
        assert_eq!(masked_hint("Fabric"), "_ _ _ _ _ _");
        assert_eq!(masked_hint(""), "");
    }
}
