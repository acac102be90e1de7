//! Default values enumerated by the configuration surface. These mirror the
//! `Default` impls in `crate::config` and exist so other crates can reference
//! a single named constant instead of a magic number.

/// Cortex system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_CONCURRENT_OPERATIONS: usize = 100;

pub const DEFAULT_MEMORY_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_MEMORY_CACHE_TTL_MS: u64 = 1_800_000;
pub const DEFAULT_QUERY_CACHE_CAPACITY: u64 = 5_000;
pub const DEFAULT_QUERY_CACHE_TTL_MS: u64 = 600_000;

/// TF-IDF dimension. Cloud embedding providers default to 1536; out of scope
/// here (no cloud provider ships in this crate) but kept for config parity.
pub const DEFAULT_TFIDF_DIMENSION: usize = 300;
pub const DEFAULT_CLOUD_DIMENSION: usize = 1536;
pub const DEFAULT_MAX_VOCABULARY_SIZE: usize = 10_000;

pub const DEFAULT_SEMANTIC_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.3;

pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.6;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.3;
pub const DEFAULT_FUZZY_WEIGHT: f64 = 0.1;

/// Relevance scoring weights (§4.3.1).
pub const DEFAULT_SCORE_WEIGHT_SEMANTIC: f64 = 0.5;
pub const DEFAULT_SCORE_WEIGHT_IMPORTANCE: f64 = 0.3;
pub const DEFAULT_SCORE_WEIGHT_RECENCY: f64 = 0.2;

/// Re-rank multipliers applied after the base relevance score.
pub const RERANK_SUBSTRING_MULTIPLIER: f64 = 1.10;
pub const RERANK_TAG_MATCH_MULTIPLIER: f64 = 1.05;
pub const RERANK_HIGH_ACCESS_MULTIPLIER: f64 = 1.02;
pub const RERANK_HIGH_ACCESS_THRESHOLD: u64 = 5;

/// Cross-scope fusion weights (SPEC_FULL §4.7 supplement).
pub const HIERARCHY_FUSION_WEIGHT_USER: f64 = 0.4;
pub const HIERARCHY_FUSION_WEIGHT_SESSION: f64 = 0.3;
pub const HIERARCHY_FUSION_WEIGHT_AGENT: f64 = 0.3;

/// Confidence decay supplement (SPEC_FULL §2).
pub const DEFAULT_ARCHIVAL_CONFIDENCE_THRESHOLD: f64 = 0.15;

/// Maximum traversal depth for graph relationship queries (§4.4).
pub const MAX_GRAPH_TRAVERSAL_DEPTH: usize = 50;

/// Maximum batch size accepted by `addBatch`-style bulk operations.
pub const MAX_BULK_BATCH_SIZE: usize = 1000;
