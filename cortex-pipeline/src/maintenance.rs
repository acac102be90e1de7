use std::sync::Arc;
use std::time::Duration;

use crate::pipeline::MemoryPipeline;

/// Spawns a periodic background task that runs cache maintenance
/// (`run_pending_tasks`) so stats reflect evictions promptly, independent of
/// read/write traffic (spec.md §4.2: "a background process evicts expired
/// entries"). Runs until `pipeline` is dropped or the returned handle is
/// aborted.
///
/// This is intentionally separate from `createBatch`'s sub-batch flushing:
/// individual `create` calls take the synchronous path in `pipeline.rs` to
/// satisfy read-your-writes (SPEC_FULL §5), and this task never touches the
/// caches' contents, only their expiry bookkeeping.
pub fn spawn_cache_maintenance(pipeline: Arc<MemoryPipeline>, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if pipeline.is_shutting_down() {
                break;
            }
            pipeline.run_pending_cache_tasks();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MemoryPipeline;
    use cortex_core::config::{CacheConfig, PipelineConfig};
    use cortex_core::traits::{EmbeddingProvider, GraphStore, VectorStore};
    use cortex_graph::InProcessGraphStore;
    use cortex_vector::InMemoryCollection;
    use std::sync::Arc;

    struct NoopEmbedder;

    #[async_trait::async_trait]
    impl EmbeddingProvider for NoopEmbedder {
        async fn embed(&self, _text: &str) -> cortex_core::errors::CortexResult<Vec<f32>> {
            Ok(vec![0.0; 4])
        }
        async fn embed_batch(&self, texts: &[String]) -> cortex_core::errors::CortexResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0; 4]).collect())
        }
        fn dimension(&self) -> usize {
            4
        }
        fn is_healthy(&self) -> bool {
            true
        }
        async fn close(&self) -> cortex_core::errors::CortexResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn maintenance_task_stops_after_shutdown() {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(NoopEmbedder);
        let vector_store: Arc<dyn VectorStore> = Arc::new(InMemoryCollection::new("test", 4));
        let graph_store: Arc<dyn GraphStore> = Arc::new(InProcessGraphStore::new());
        let pipeline = Arc::new(MemoryPipeline::new(
            embedder,
            vector_store,
            graph_store,
            PipelineConfig::default(),
            &CacheConfig::default(),
        ));

        let handle = spawn_cache_maintenance(pipeline.clone(), Duration::from_millis(5));
        pipeline.shutdown().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }
}
