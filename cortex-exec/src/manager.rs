use std::num::NonZeroUsize;

use cortex_core::config::ExecutionConfig;

use crate::pool::ExecutionPool;

/// The four logically separate worker pools memory operations are
/// dispatched across (SPEC_FULL §5).
///
/// Splitting vector math, embedding, memory-management bookkeeping, and I/O
/// into separate pools means a burst of slow embedding calls can't starve
/// cheap vector-math work, and vice versa.
pub struct ExecutionManager {
    vector_math: ExecutionPool,
    embedding: ExecutionPool,
    memory_management: ExecutionPool,
    io: ExecutionPool,
}

fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

impl ExecutionManager {
    pub fn new(config: &ExecutionConfig) -> Self {
        let cores = available_cores();
        let vector_math_threads = config.vector_math_threads.unwrap_or_else(|| (cores / 2).max(1));
        let embedding_threads = config.embedding_threads.unwrap_or_else(|| (cores / 4).max(1));
        let memory_management_threads =
            config.memory_management_threads.unwrap_or_else(|| (cores / 4).max(1));
        let io_threads = config
            .io_threads
            .unwrap_or_else(|| (cores * 2).min(config.io_pool_cap).max(1));

        Self {
            vector_math: ExecutionPool::new("vector-math", vector_math_threads, vector_math_threads * 4),
            embedding: ExecutionPool::new("embedding", embedding_threads, embedding_threads * 4),
            memory_management: ExecutionPool::new(
                "memory-mgmt",
                memory_management_threads,
                memory_management_threads * 4,
            ),
            io: ExecutionPool::new("io", io_threads, io_threads * 4),
        }
    }

    pub fn vector_math(&self) -> &ExecutionPool {
        &self.vector_math
    }

    pub fn embedding(&self) -> &ExecutionPool {
        &self.embedding
    }

    pub fn memory_management(&self) -> &ExecutionPool {
        &self.memory_management
    }

    pub fn io(&self) -> &ExecutionPool {
        &self.io
    }

    /// Occupancy snapshot across all four pools (SPEC_FULL §2
    /// "execution-manager utilization"), folded into `cortex-runtime`'s
    /// top-level `stats()` response.
    pub fn stats(&self) -> ExecutionStats {
        ExecutionStats {
            vector_math: self.vector_math.stats(),
            embedding: self.embedding.stats(),
            memory_management: self.memory_management.stats(),
            io: self.io.stats(),
        }
    }
}

/// Snapshot of all four pools' occupancy at once.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionStats {
    pub vector_math: crate::pool::PoolStats,
    pub embedding: crate::pool::PoolStats,
    pub memory_management: crate::pool::PoolStats,
    pub io: crate::pool::PoolStats,
}
