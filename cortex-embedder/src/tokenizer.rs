/// Lowercase, replace non-alphanumeric with whitespace, split, drop tokens
/// of length <= 1 or >= 50 (spec.md §4.6 "Tokenization").
pub fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|tok| tok.chars().count() > 1 && tok.chars().count() < 50)
        .map(|tok| tok.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_punctuation() {
        let tokens = tokenize("Hello, World! Rust-lang.");
        assert_eq!(tokens, vec!["hello", "world", "rust", "lang"]);
    }

    #[test]
    fn drops_single_character_tokens() {
        let tokens = tokenize("a bb c dd");
        assert_eq!(tokens, vec!["bb", "dd"]);
    }

    #[test]
    fn drops_tokens_50_chars_or_longer() {
        let long = "a".repeat(50);
        let short = "a".repeat(49);
        let text = format!("{long} {short}");
        let tokens = tokenize(&text);
        assert_eq!(tokens, vec![short]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("!!!").is_empty());
    }
}
