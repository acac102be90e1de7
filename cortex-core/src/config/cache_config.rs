use serde::{Deserialize, Serialize};

use super::defaults;

/// The two TTL caches fronting the pipeline (spec.md §4.2, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Memory-by-id cache entry capacity.
    pub memory_capacity: u64,
    pub memory_ttl_ms: u64,
    /// Query-result cache entry capacity.
    pub query_capacity: u64,
    pub query_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_capacity: defaults::DEFAULT_MEMORY_CACHE_CAPACITY,
            memory_ttl_ms: defaults::DEFAULT_MEMORY_CACHE_TTL_MS,
            query_capacity: defaults::DEFAULT_QUERY_CACHE_CAPACITY,
            query_ttl_ms: defaults::DEFAULT_QUERY_CACHE_TTL_MS,
        }
    }
}
