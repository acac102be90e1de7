use serde::{Deserialize, Serialize};

use super::defaults;

/// Memory pipeline configuration (spec.md §4.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Items per background batch flush.
    pub max_batch_size: usize,
    /// Retry attempts for BACKEND_TRANSIENT failures before surfacing.
    pub max_retries: u32,
    /// Base backoff; actual delay is `retry_delay_ms * (attempt + 1)`.
    pub retry_delay_ms: u64,
    /// Size of the operation permit pool.
    pub max_concurrent_operations: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_batch_size: defaults::DEFAULT_MAX_BATCH_SIZE,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            retry_delay_ms: defaults::DEFAULT_RETRY_DELAY_MS,
            max_concurrent_operations: defaults::DEFAULT_MAX_CONCURRENT_OPERATIONS,
        }
    }
}
