//! Abbreviation-tolerant name matching.
//!
//! Both sides are lowercased, dots become spaces, and the result is split
//! into tokens. Every query token must match some text token, where two
//! tokens match when one contains or starts with the other. So `"K L"`
//! finds `"Kamal Lochan"`, and `"Kamal"` finds `"K. L. Patra"`.
//!
//! There is no edit distance or phonetic matching.

/// Lowercase, treat `.` as a separator, split on whitespace.
pub fn tokenize(s: &str) -> Vec<String> {
    s.to_lowercase()
        .replace('.', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn tokens_match(text_token: &str, query_token: &str) -> bool {
    text_token.contains(query_token)
        || query_token.starts_with(text_token)
        || text_token.starts_with(query_token)
}

/// True when every query token matches at least one text token.
///
/// A query with no tokens matches everything.
pub fn is_fuzzy_match(text: &str, query: &str) -> bool {
    let text_tokens = tokenize(text);
    tokenize(query)
        .iter()
        .all(|q| text_tokens.iter().any(|t| tokens_match(t, q)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("K. L.  Patra"), vec!["k", "l", "patra"]);
        assert_eq!(tokenize("Int.MSc."), vec!["int", "msc"]);
        assert!(tokenize(" . . ").is_empty());
    }

    #[test]
    fn test_initials_match_full_name() {
        assert!(is_fuzzy_match("Kamal Lochan Patra", "K L"));
    }

    #[test]
    fn test_initials_with_dots() {
        assert!(is_fuzzy_match("K. L. Patra", "K L"));
    }

    #[test]
    fn test_full_name_matches_initials() {
        // text token "k" is a prefix of query token "kamal"
        assert!(is_fuzzy_match("K. L. Patra", "Kamal"));
        assert!(is_fuzzy_match("K. L. Patra", "Kamal Lochan"));
    }

    #[test]
    fn test_substring_inside_token() {
        assert!(is_fuzzy_match("Kamal Lochan Patra", "ochan"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_fuzzy_match("kamal lochan", "KAMAL"));
    }

    #[test]
    fn test_every_query_token_must_match() {
        assert!(!is_fuzzy_match("Kamal Lochan Patra", "Kamal Kumar"));
        assert!(!is_fuzzy_match("Kamal Lochan Patra", "Kumar"));
    }

    #[test]
    fn test_empty_query_matches_vacuously() {
        assert!(is_fuzzy_match("anything", ""));
        assert!(is_fuzzy_match("", "..."));
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        assert!(!is_fuzzy_match("", "alice"));
    }

    #[test]
    fn test_token_order_irrelevant() {
        assert!(is_fuzzy_match("Kamal Lochan Patra", "Patra Kamal"));
    }
}
