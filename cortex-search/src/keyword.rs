use cortex_core::memory::BaseMemory;

/// Lowercased token-match: `score = matched_query_tokens / query_tokens` (§4.2).
pub fn score(query: &str, memory: &BaseMemory) -> f64 {
    let query_tokens: Vec<String> = tokens(query);
    if query_tokens.is_empty() {
        return 0.0;
    }
    let content_tokens: Vec<String> = tokens(&memory.content);
    let matched = query_tokens
        .iter()
        .filter(|t| content_tokens.contains(t))
        .count();
    matched as f64 / query_tokens.len() as f64
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::memory::{Importance, MemoryType};

    fn memory(content: &str) -> BaseMemory {
        BaseMemory::new(
            "m1".to_string(),
            content.to_string(),
            "u1".to_string(),
            MemoryType::Factual,
            Importance::Medium,
        )
    }

    #[test]
    fn all_tokens_matched_scores_one() {
        let m = memory("the quick brown fox");
        assert_eq!(score("quick fox", &m), 1.0);
    }

    #[test]
    fn no_tokens_matched_scores_zero() {
        let m = memory("the quick brown fox");
        assert_eq!(score("slow turtle", &m), 0.0);
    }

    #[test]
    fn partial_match_is_fractional() {
        let m = memory("the quick brown fox");
        assert_eq!(score("quick turtle", &m), 0.5);
    }

    #[test]
    fn empty_query_scores_zero() {
        let m = memory("the quick brown fox");
        assert_eq!(score("", &m), 0.0);
    }
}
