//! Single source of truth for config default values (spec.md §6).

use crate::constants;

// --- Pipeline ---
pub const DEFAULT_MAX_BATCH_SIZE: usize = constants::DEFAULT_MAX_BATCH_SIZE;
pub const DEFAULT_MAX_RETRIES: u32 = constants::DEFAULT_MAX_RETRIES;
pub const DEFAULT_RETRY_DELAY_MS: u64 = constants::DEFAULT_RETRY_DELAY_MS;
pub const DEFAULT_MAX_CONCURRENT_OPERATIONS: usize = constants::DEFAULT_MAX_CONCURRENT_OPERATIONS;

// --- Cache ---
pub const DEFAULT_MEMORY_CACHE_CAPACITY: u64 = constants::DEFAULT_MEMORY_CACHE_CAPACITY;
pub const DEFAULT_MEMORY_CACHE_TTL_MS: u64 = constants::DEFAULT_MEMORY_CACHE_TTL_MS;
pub const DEFAULT_QUERY_CACHE_CAPACITY: u64 = constants::DEFAULT_QUERY_CACHE_CAPACITY;
pub const DEFAULT_QUERY_CACHE_TTL_MS: u64 = constants::DEFAULT_QUERY_CACHE_TTL_MS;

// --- Embedder ---
pub const DEFAULT_EMBEDDER_DIMENSION: usize = constants::DEFAULT_TFIDF_DIMENSION;
pub const DEFAULT_MAX_VOCABULARY_SIZE: usize = constants::DEFAULT_MAX_VOCABULARY_SIZE;

// --- Search ---
pub const DEFAULT_SEMANTIC_THRESHOLD: f64 = constants::DEFAULT_SEMANTIC_THRESHOLD;
pub const DEFAULT_MAX_RESULTS: usize = constants::DEFAULT_MAX_RESULTS;
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = constants::DEFAULT_RELEVANCE_THRESHOLD;

// --- Hybrid fusion ---
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = constants::DEFAULT_SEMANTIC_WEIGHT;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = constants::DEFAULT_KEYWORD_WEIGHT;
pub const DEFAULT_FUZZY_WEIGHT: f64 = constants::DEFAULT_FUZZY_WEIGHT;

// --- Graph ---
pub const DEFAULT_MAX_TRAVERSAL_DEPTH: usize = constants::MAX_GRAPH_TRAVERSAL_DEPTH;

// --- Execution pools ---
pub const DEFAULT_IO_POOL_CAP: usize = 32;

// --- Logging ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
