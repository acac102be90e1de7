use std::collections::HashMap;

/// A bounded synonym table for query expansion (§4.3: "≤ 5 expansions
/// including the original"). Callers may supply a richer table; the
/// built-in defaults cover a handful of common substitutions so the engine
/// has sensible behavior out of the box.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

const MAX_EXPANSIONS: usize = 5;

impl SynonymTable {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    pub fn with_defaults() -> Self {
        let mut entries = HashMap::new();
        entries.insert("bug".to_string(), vec!["defect".to_string(), "issue".to_string()]);
        entries.insert("fast".to_string(), vec!["quick".to_string(), "rapid".to_string()]);
        entries.insert("error".to_string(), vec!["failure".to_string(), "fault".to_string()]);
        Self::new(entries)
    }

    /// Expand `query` into at most `MAX_EXPANSIONS` variants, the original
    /// query always first.
    pub fn expand(&self, query: &str) -> Vec<String> {
        let mut expansions = vec![query.to_string()];
        'tokens: for token in query.to_lowercase().split_whitespace() {
            if let Some(synonyms) = self.entries.get(token) {
                for synonym in synonyms {
                    if expansions.len() >= MAX_EXPANSIONS {
                        break 'tokens;
                    }
                    let variant = query.to_lowercase().replacen(token, synonym, 1);
                    if !expansions.contains(&variant) {
                        expansions.push(variant);
                    }
                }
            }
        }
        expansions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_terms_yield_only_the_original() {
        let table = SynonymTable::with_defaults();
        assert_eq!(table.expand("hello world"), vec!["hello world".to_string()]);
    }

    #[test]
    fn known_term_adds_variants() {
        let table = SynonymTable::with_defaults();
        let expansions = table.expand("bug report");
        assert!(expansions.len() > 1);
        assert_eq!(expansions[0], "bug report");
    }

    #[test]
    fn expansions_never_exceed_the_cap() {
        let mut entries = HashMap::new();
        entries.insert(
            "x".to_string(),
            vec!["a", "b", "c", "d", "e", "f"].into_iter().map(String::from).collect(),
        );
        let table = SynonymTable::new(entries);
        assert!(table.expand("x").len() <= MAX_EXPANSIONS);
    }
}
