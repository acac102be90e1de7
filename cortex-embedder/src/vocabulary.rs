use std::collections::HashMap;
use std::sync::RwLock;

use crate::tokenizer::tokenize;

struct VocabState {
    term_index: HashMap<String, usize>,
    idf: HashMap<String, f64>,
    trained: bool,
}

/// The TF-IDF vocabulary and IDF table (spec.md §4.1 "TF-IDF index state").
///
/// Invariant: once `train_on_corpus` runs, every term in `idf` is also in
/// `term_index`.
pub struct Vocabulary {
    state: RwLock<VocabState>,
    max_size: usize,
}

impl Vocabulary {
    pub fn new(max_size: usize) -> Self {
        Self {
            state: RwLock::new(VocabState {
                term_index: HashMap::new(),
                idf: HashMap::new(),
                trained: false,
            }),
            max_size,
        }
    }

    /// Returns the term's vocabulary index, inserting it if there's room.
    /// Returns `None` if the term is new and the vocabulary is at capacity
    /// (spec.md §8: "Vocabulary at capacity drops the next new term without
    /// error").
    pub fn get_or_insert(&self, term: &str) -> Option<usize> {
        {
            let state = self.state.read().unwrap();
            if let Some(&idx) = state.term_index.get(term) {
                return Some(idx);
            }
        }
        let mut state = self.state.write().unwrap();
        if let Some(&idx) = state.term_index.get(term) {
            return Some(idx);
        }
        if state.term_index.len() >= self.max_size {
            return None;
        }
        let idx = state.term_index.len();
        state.term_index.insert(term.to_string(), idx);
        Some(idx)
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.state.read().unwrap().term_index.get(term).copied()
    }

    /// `idf(t) = ln(N / (1 + df(t)))` post-training; `1.0` for any query
    /// before `train_on_corpus` has run (spec.md §4.6).
    pub fn idf(&self, term: &str) -> f64 {
        let state = self.state.read().unwrap();
        if state.trained {
            *state.idf.get(term).unwrap_or(&1.0)
        } else {
            1.0
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap().term_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_trained(&self) -> bool {
        self.state.read().unwrap().trained
    }

    pub fn terms(&self) -> Vec<String> {
        self.state.read().unwrap().term_index.keys().cloned().collect()
    }

    /// Rebuild the vocabulary from a corpus: collect distinct terms, sort
    /// lexicographically ascending, truncate to `max_size`, then compute
    /// each kept term's document frequency and IDF (spec.md §4.6
    /// "Vocabulary", Open Question #1: lexicographic order chosen for
    /// determinism since the spec leaves tie-breaking to the implementer).
    pub fn train_on_corpus(&self, corpus: &[String]) {
        let mut distinct_terms: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
        let mut doc_freq: HashMap<String, u64> = HashMap::new();
        for doc in corpus {
            let mut seen_in_doc = std::collections::HashSet::new();
            for term in tokenize(doc) {
                distinct_terms.insert(term.clone());
                if seen_in_doc.insert(term.clone()) {
                    *doc_freq.entry(term).or_insert(0) += 1;
                }
            }
        }

        let kept: Vec<String> = distinct_terms.into_iter().take(self.max_size).collect();
        let n = corpus.len() as f64;
        let mut term_index = HashMap::with_capacity(kept.len());
        let mut idf = HashMap::with_capacity(kept.len());
        for (index, term) in kept.into_iter().enumerate() {
            let df = *doc_freq.get(&term).unwrap_or(&0) as f64;
            idf.insert(term.clone(), (n / (1.0 + df)).ln());
            term_index.insert(term, index);
        }

        let mut state = self.state.write().unwrap();
        state.term_index = term_index;
        state.idf = idf;
        state.trained = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_growth_assigns_sequential_indices() {
        let vocab = Vocabulary::new(10);
        assert_eq!(vocab.get_or_insert("alpha"), Some(0));
        assert_eq!(vocab.get_or_insert("beta"), Some(1));
        assert_eq!(vocab.get_or_insert("alpha"), Some(0));
    }

    #[test]
    fn capacity_drops_new_terms_silently() {
        let vocab = Vocabulary::new(1);
        assert_eq!(vocab.get_or_insert("alpha"), Some(0));
        assert_eq!(vocab.get_or_insert("beta"), None);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn idf_falls_back_to_one_before_training() {
        let vocab = Vocabulary::new(10);
        vocab.get_or_insert("alpha");
        assert_eq!(vocab.idf("alpha"), 1.0);
    }

    #[test]
    fn train_on_corpus_sets_idf_consistently_with_vocab() {
        let vocab = Vocabulary::new(10);
        let corpus = vec![
            "rust systems programming".to_string(),
            "rust web programming".to_string(),
            "cooking recipes".to_string(),
        ];
        vocab.train_on_corpus(&corpus);
        assert!(vocab.is_trained());
        for term in vocab.terms() {
            assert!(vocab.index_of(&term).is_some());
        }
        // "rust" appears in 2/3 docs, "cooking" in 1/3: rust's idf is lower.
        assert!(vocab.idf("rust") < vocab.idf("cooking"));
    }

    #[test]
    fn train_on_corpus_truncates_to_max_size_lexicographically() {
        let vocab = Vocabulary::new(2);
        let corpus = vec!["zeta yankee alpha".to_string()];
        vocab.train_on_corpus(&corpus);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.index_of("alpha"), Some(0));
        assert_eq!(vocab.index_of("yankee"), Some(1));
        assert_eq!(vocab.index_of("zeta"), None);
    }
}
