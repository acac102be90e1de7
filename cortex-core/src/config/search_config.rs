use serde::{Deserialize, Serialize};

use super::defaults;

/// Semantic search thresholds (spec.md §4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum cosine similarity for a semantic candidate to count.
    pub semantic_threshold: f64,
    /// Default result cap when the caller doesn't specify one.
    pub max_results: usize,
    /// Minimum final relevance score for a result to be returned.
    pub relevance_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            semantic_threshold: defaults::DEFAULT_SEMANTIC_THRESHOLD,
            max_results: defaults::DEFAULT_MAX_RESULTS,
            relevance_threshold: defaults::DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}
