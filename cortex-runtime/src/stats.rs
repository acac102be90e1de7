use std::collections::HashMap;

use cortex_core::memory::MemoryType;
use cortex_exec::ExecutionStats;
use cortex_pipeline::PipelineStats;

/// The `stats` call's snapshot struct (spec.md §6), expanded per SPEC_FULL
/// §2 to carry counts by type, average confidence, cache hit rates (via
/// `pipeline`), pool queue depths, and execution-manager utilization.
#[derive(Debug, Clone)]
pub struct RuntimeStats {
    pub pipeline: PipelineStats,
    pub execution: ExecutionStats,
    pub indexed_memory_count: usize,
    pub memory_type_counts: HashMap<MemoryType, usize>,
    pub average_confidence: f64,
    pub user_scope_count: usize,
    pub session_scope_count: usize,
    pub agent_scope_count: usize,
}
