use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights for the three hybrid-search strategies (spec.md §4.3).
///
/// Fusion is `max(strategy_score * weight)` across strategies, not RRF; see
/// the grounding ledger for why this repo keeps the max form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    pub semantic_weight: f64,
    pub keyword_weight: f64,
    pub fuzzy_weight: f64,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            semantic_weight: defaults::DEFAULT_SEMANTIC_WEIGHT,
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
            fuzzy_weight: defaults::DEFAULT_FUZZY_WEIGHT,
        }
    }
}
