use serde::{Deserialize, Serialize};

use super::defaults;

/// Worker-pool sizing for the four execution lanes (SPEC_FULL §5 ambient
/// stack: the spec's "parallel where it helps" guidance made concrete).
///
/// Ratios are applied against `num_cpus` at runtime construction time; the
/// fields here hold overrides, `None` meaning "derive from core count".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Vector-math pool size override (default ~50% of cores).
    pub vector_math_threads: Option<usize>,
    /// Embedding pool size override (default ~25% of cores).
    pub embedding_threads: Option<usize>,
    /// Memory-management pool size override (default ~25% of cores).
    pub memory_management_threads: Option<usize>,
    /// I/O pool size override (default up to 2x cores, capped).
    pub io_threads: Option<usize>,
    /// Hard cap on the I/O pool regardless of core count.
    pub io_pool_cap: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            vector_math_threads: None,
            embedding_threads: None,
            memory_management_threads: None,
            io_threads: None,
            io_pool_cap: defaults::DEFAULT_IO_POOL_CAP,
        }
    }
}
