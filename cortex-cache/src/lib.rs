//! # cortex-cache
//!
//! TTL-bounded caching and typed object pooling shared by the pipeline,
//! the embedder, and search.

mod object_pool;
mod stats;
mod ttl_cache;

pub use object_pool::ObjectPool;
pub use stats::{CacheStats, CacheStatsCounters};
pub use ttl_cache::TtlCache;
