use serde::{Deserialize, Serialize};

use super::defaults;

/// In-process TF-IDF embedder configuration (spec.md §4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedderConfig {
    /// Output vector dimension.
    pub dimension: usize,
    /// Hard cap on the number of distinct terms tracked.
    pub max_vocabulary_size: usize,
    /// Query-embedding cache capacity.
    pub query_cache_capacity: u64,
    pub query_cache_ttl_ms: u64,
    /// Object-pool capacity for reusable vector buffers.
    pub vector_pool_capacity: usize,
    /// Object-pool capacity for reusable term-frequency maps.
    pub term_freq_pool_capacity: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            dimension: defaults::DEFAULT_EMBEDDER_DIMENSION,
            max_vocabulary_size: defaults::DEFAULT_MAX_VOCABULARY_SIZE,
            query_cache_capacity: 5_000,
            query_cache_ttl_ms: 600_000,
            vector_pool_capacity: 200,
            term_freq_pool_capacity: 100,
        }
    }
}
