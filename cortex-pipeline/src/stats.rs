use cortex_cache::CacheStats;

/// Snapshot of pipeline-level health, folded into `cortex-runtime`'s
/// top-level `stats()` response (spec.md §6).
#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub memory_cache: CacheStats,
    pub query_cache: CacheStats,
    pub in_flight_operations: usize,
    pub is_shutting_down: bool,
}
