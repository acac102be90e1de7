use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cortex_cache::TtlCache;
use cortex_core::config::{CacheConfig, PipelineConfig};
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::memory::BaseMemory;
use cortex_core::traits::{EmbeddingProvider, GraphStore, VectorStore};
use serde_json::{json, Value};
use tokio::task::JoinSet;

use crate::cache_keys::{query_cache_key, UserQueryIndex};
use crate::permit::PermitPool;
use crate::reclassify::{default_reclassifier, AccessStats, Reclassifier};
use crate::request::CreateRequest;
use crate::retry::retry_with_backoff;
use crate::stats::PipelineStats;

const SHUTDOWN_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);
/// Candidate over-fetch multiplier: the vector backend is searched for more
/// than `limit` hits so post-filtering by `userId` and `threshold` still
/// leaves enough results to fill the caller's requested `limit`.
const CANDIDATE_OVERFETCH: usize = 5;

/// Orchestrates embed -> dual-write(vector, graph) -> retrieve -> rank
/// across a vector store, a graph store, and an embedding provider
/// (spec.md §4.1).
///
/// The graph store is the system of record for the full `BaseMemory`
/// (serialized into the node's `memory` property); the vector store holds
/// only `id -> embedding`. This keeps the two backends aligned with
/// spec.md §4.5's narrow vector adapter contract while giving `search` a
/// full record to hand back after a vector hit.
pub struct MemoryPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    graph_store: Arc<dyn GraphStore>,
    memory_cache: TtlCache<String, BaseMemory>,
    query_cache: TtlCache<String, Vec<BaseMemory>>,
    query_index: UserQueryIndex,
    permits: PermitPool,
    config: PipelineConfig,
    reclassifier: Option<Reclassifier>,
}

impl MemoryPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
        graph_store: Arc<dyn GraphStore>,
        pipeline_config: PipelineConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            graph_store,
            memory_cache: TtlCache::new(cache_config.memory_capacity, Duration::from_millis(cache_config.memory_ttl_ms)),
            query_cache: TtlCache::new(cache_config.query_capacity, Duration::from_millis(cache_config.query_ttl_ms)),
            query_index: UserQueryIndex::new(),
            permits: PermitPool::new(pipeline_config.max_concurrent_operations),
            config: pipeline_config,
            reclassifier: Some(default_reclassifier()),
        }
    }

    /// Install a custom reclassification hook, or `None` to disable
    /// opportunistic reclassification on read.
    pub fn with_reclassifier(mut self, reclassifier: Option<Reclassifier>) -> Self {
        self.reclassifier = reclassifier;
        self
    }

    fn memory_to_properties(memory: &BaseMemory) -> HashMap<String, Value> {
        let mut properties = HashMap::new();
        properties.insert("user_id".to_string(), json!(memory.user_id));
        properties.insert("memory_type".to_string(), json!(memory.memory_type.as_str()));
        properties.insert("memory".to_string(), serde_json::to_value(memory).unwrap_or(Value::Null));
        properties
    }

    fn properties_to_memory(properties: &HashMap<String, Value>) -> Option<BaseMemory> {
        properties.get("memory").and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// `create(content, userId, metadata) -> id` (spec.md §4.1).
    pub async fn create(&self, request: CreateRequest) -> CortexResult<String> {
        let _guard = self.permits.acquire("create").await?;
        if request.content.trim().is_empty() {
            return Err(CortexError::invalid_input("create", "content must not be empty"));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let mut memory = BaseMemory::new(
            id.clone(),
            request.content.clone(),
            request.user_id.clone(),
            request.memory_type,
            request.importance,
        );
        memory.session_id = request.session_id;
        memory.tags = request.tags;
        memory.metadata = request.metadata;

        retry_with_backoff(
            "create",
            self.config.max_retries,
            self.config.retry_delay_ms,
            || self.write_memory(&memory),
        )
        .await?;

        // Read-your-writes (SPEC_FULL §5): the memory cache is populated
        // synchronously, before `create` returns, so a caller's immediate
        // `search`/`get` observes it.
        self.memory_cache.insert(id.clone(), memory);
        self.invalidate_queries_for(&request.user_id);
        Ok(id)
    }

    async fn write_memory(&self, memory: &BaseMemory) -> CortexResult<()> {
        tracing::debug!(id = %memory.id, "pipeline state: embedding");
        let embedding = self.embedder.embed(&memory.content).await?;

        tracing::debug!(id = %memory.id, "pipeline state: fanout");
        let vector_store = self.vector_store.clone();
        let graph_store = self.graph_store.clone();
        let memory_for_graph = memory.clone();

        let vector_future = vector_store.upsert(&memory.id, &embedding);
        let graph_future = tokio::task::spawn_blocking(move || {
            graph_store.create_node_with_id(
                &memory_for_graph.id,
                "memory",
                Self::memory_to_properties(&memory_for_graph),
                Some(memory_for_graph.user_id.clone()),
            )
        });

        let (vector_result, graph_result) = tokio::join!(vector_future, graph_future);
        let graph_result = graph_result.map_err(|err| CortexError::BackendTransient {
            operation: "create".to_string(),
            reason: err.to_string(),
        })?;

        match (vector_result, graph_result) {
            (Ok(()), Ok(())) => {
                tracing::debug!(id = %memory.id, "pipeline state: committed");
                Ok(())
            }
            (Ok(()), Err(graph_err)) => {
                tracing::warn!(id = %memory.id, error = %graph_err, "pipeline state: compensating");
                if let Err(compensation_err) = self.vector_store.delete(&memory.id).await {
                    tracing::error!(id = %memory.id, error = %compensation_err, "compensating vector delete failed");
                }
                Err(graph_err)
            }
            (Err(vector_err), _) => Err(vector_err),
        }
    }

    /// `createBatch(requests[]) -> ids[]` (spec.md §4.1). Splits into
    /// sub-batches of `maxBatchSize`, embeds each sub-batch in one call,
    /// then writes every record in parallel; a single item's failure
    /// produces `None` in its slot rather than aborting the batch.
    pub async fn create_batch(&self, requests: Vec<CreateRequest>) -> CortexResult<Vec<Option<String>>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let _guard = self.permits.acquire("create_batch").await?;

        let mut results: Vec<Option<String>> = vec![None; requests.len()];
        for (chunk_start, chunk) in requests.chunks(self.config.max_batch_size.max(1)).enumerate() {
            let base_index = chunk_start * self.config.max_batch_size.max(1);
            let texts: Vec<String> = chunk.iter().map(|r| r.content.clone()).collect();

            let embeddings = match self.embedder.embed_batch(&texts).await {
                Ok(embeddings) => embeddings,
                Err(err) => {
                    tracing::warn!(error = %err, "sub-batch embedding failed; all items in this sub-batch fail");
                    continue;
                }
            };

            let mut joins: JoinSet<(usize, CortexResult<BaseMemory>)> = JoinSet::new();
            for (offset, (request, embedding)) in chunk.iter().cloned().zip(embeddings).enumerate() {
                let index = base_index + offset;
                let vector_store = self.vector_store.clone();
                let graph_store = self.graph_store.clone();
                let max_retries = self.config.max_retries;
                let retry_delay_ms = self.config.retry_delay_ms;

                joins.spawn(async move {
                    if request.content.trim().is_empty() {
                        return (index, Err(CortexError::invalid_input("create_batch", "content must not be empty")));
                    }
                    let id = uuid::Uuid::new_v4().to_string();
                    let mut memory = BaseMemory::new(
                        id,
                        request.content.clone(),
                        request.user_id.clone(),
                        request.memory_type,
                        request.importance,
                    );
                    memory.session_id = request.session_id;
                    memory.tags = request.tags;
                    memory.metadata = request.metadata;

                    let result = retry_with_backoff("create_batch_item", max_retries, retry_delay_ms, || {
                        write_fanout(vector_store.clone(), graph_store.clone(), &memory, embedding.clone())
                    })
                    .await;
                    (index, result.map(|_| memory))
                });
            }

            while let Some(joined) = joins.join_next().await {
                match joined {
                    Ok((index, Ok(memory))) => {
                        let id = memory.id.clone();
                        let user_id = memory.user_id.clone();
                        self.memory_cache.insert(id.clone(), memory);
                        self.invalidate_queries_for(&user_id);
                        results[index] = Some(id);
                    }
                    Ok((index, Err(err))) => {
                        tracing::warn!(index, error = %err, "create_batch item failed");
                    }
                    Err(join_err) => {
                        tracing::error!(error = %join_err, "create_batch task panicked");
                    }
                }
            }
        }
        Ok(results)
    }

    fn invalidate_queries_for(&self, user_id: &str) {
        for key in self.query_index.take_keys_for_user(user_id) {
            self.query_cache.invalidate(&key);
        }
    }

    /// `get(id) -> Memory | null`, consulting the memory cache before
    /// falling back to the graph store (the system of record).
    pub async fn get(&self, id: &str) -> CortexResult<Option<BaseMemory>> {
        let _guard = self.permits.acquire("get").await?;
        self.get_uncounted(id).await
    }

    async fn get_uncounted(&self, id: &str) -> CortexResult<Option<BaseMemory>> {
        if let Some(memory) = self.memory_cache.get(&id.to_string()) {
            return Ok(Some(self.record_access_and_reclassify(memory)));
        }

        let graph_store = self.graph_store.clone();
        let id_owned = id.to_string();
        let node = tokio::task::spawn_blocking(move || graph_store.get_node(&id_owned))
            .await
            .map_err(|err| CortexError::BackendTransient { operation: "get".to_string(), reason: err.to_string() })??;

        let Some(node) = node else { return Ok(None) };
        let Some(memory) = Self::properties_to_memory(&node.properties) else {
            return Err(CortexError::Corruption {
                operation: "get".to_string(),
                details: format!("graph node {id} is missing its memory payload"),
            });
        };
        let memory = self.record_access_and_reclassify(memory);
        self.memory_cache.insert(id.to_string(), memory.clone());
        Ok(Some(memory))
    }

    fn record_access_and_reclassify(&self, mut memory: BaseMemory) -> BaseMemory {
        memory.record_access();
        if let Some(reclassifier) = &self.reclassifier {
            let stats = AccessStats::from_memory(&memory);
            memory.importance = reclassifier(&memory, stats);
        }
        memory
    }

    /// `search(query, userId, limit, threshold) -> [Memory]` (spec.md
    /// §4.1). `limit = 0` returns empty without embedding (spec.md §8
    /// boundary behavior).
    pub async fn search(&self, query: &str, user_id: &str, limit: usize, threshold: f64) -> CortexResult<Vec<BaseMemory>> {
        let _guard = self.permits.acquire("search").await?;
        if query.trim().is_empty() {
            return Err(CortexError::invalid_input("search", "query must not be empty"));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        let cache_key = query_cache_key(query, user_id, limit, threshold);
        if let Some(cached) = self.query_cache.get(&cache_key) {
            return Ok(cached);
        }

        let embedding = self.embedder.embed(query).await?;
        let candidate_limit = (limit * CANDIDATE_OVERFETCH).max(limit);
        let matches = self.vector_store.search(&embedding, candidate_limit).await?;

        let mut results = Vec::with_capacity(limit);
        for candidate in matches {
            if candidate.score < threshold {
                continue;
            }
            if let Some(memory) = self.get_uncounted(&candidate.id).await? {
                if memory.user_id == user_id && !memory.archived {
                    results.push(memory);
                }
            }
            if results.len() >= limit {
                break;
            }
        }
        results.truncate(limit);

        self.query_cache.insert(cache_key.clone(), results.clone());
        self.query_index.record(user_id, cache_key);
        Ok(results)
    }

    /// `update(id, newContent, newMetadata) -> bool` (spec.md §4.1).
    /// Preserves `createdAt`, bumps `updatedAt`; returns `false` if `id` is
    /// unknown.
    pub async fn update(
        &self,
        id: &str,
        new_content: Option<String>,
        new_metadata: Option<HashMap<String, Value>>,
    ) -> CortexResult<bool> {
        let _guard = self.permits.acquire("update").await?;
        let Some(mut memory) = self.get_uncounted(id).await? else {
            return Ok(false);
        };

        let content_changed = new_content.is_some();
        memory.apply_update(new_content, new_metadata);

        if content_changed {
            let embedding = self.embedder.embed(&memory.content).await?;
            self.vector_store.upsert(id, &embedding).await?;
        }

        let graph_store = self.graph_store.clone();
        let memory_for_graph = memory.clone();
        let id_owned = id.to_string();
        tokio::task::spawn_blocking(move || {
            graph_store.update_node(&id_owned, MemoryPipeline::memory_to_properties(&memory_for_graph))
        })
        .await
        .map_err(|err| CortexError::BackendTransient { operation: "update".to_string(), reason: err.to_string() })??;

        self.memory_cache.insert(id.to_string(), memory.clone());
        self.invalidate_queries_for(&memory.user_id);
        Ok(true)
    }

    /// `delete(id) -> bool`. Cascades to the vector store and graph store
    /// (whose own cascade removes incident edges); returns `false` if `id`
    /// is unknown (idempotent on a second call, spec.md §8 invariant 2).
    pub async fn delete(&self, id: &str) -> CortexResult<bool> {
        let _guard = self.permits.acquire("delete").await?;
        let Some(memory) = self.get_uncounted(id).await? else {
            return Ok(false);
        };

        self.vector_store.delete(id).await?;
        let graph_store = self.graph_store.clone();
        let id_owned = id.to_string();
        let deleted = tokio::task::spawn_blocking(move || graph_store.delete_node(&id_owned))
            .await
            .map_err(|err| CortexError::BackendTransient { operation: "delete".to_string(), reason: err.to_string() })??;

        self.memory_cache.invalidate(&id.to_string());
        self.invalidate_queries_for(&memory.user_id);
        Ok(deleted)
    }

    /// Stop accepting new operations and wait for in-flight ones to drain,
    /// then clear caches (spec.md §4.1 Shutdown).
    pub async fn shutdown(&self) {
        self.permits.begin_shutdown(SHUTDOWN_DRAIN_TIMEOUT).await;
        self.memory_cache.invalidate_all();
        self.query_cache.invalidate_all();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.permits.is_shutting_down()
    }

    /// Drives moka's background expiry bookkeeping for both caches. Called
    /// by the periodic maintenance task, not by request-handling paths.
    pub fn run_pending_cache_tasks(&self) {
        self.memory_cache.run_pending_tasks();
        self.query_cache.run_pending_tasks();
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            memory_cache: self.memory_cache.stats(),
            query_cache: self.query_cache.stats(),
            in_flight_operations: self.permits.in_flight(),
            is_shutting_down: self.permits.is_shutting_down(),
        }
    }
}

/// Free function version of the vector/graph fanout used by `create_batch`'s
/// per-item tasks, which can't borrow `&self` across a `tokio::spawn`.
async fn write_fanout(
    vector_store: Arc<dyn VectorStore>,
    graph_store: Arc<dyn GraphStore>,
    memory: &BaseMemory,
    embedding: Vec<f32>,
) -> CortexResult<()> {
    let graph_store_for_blocking = graph_store.clone();
    let memory_for_graph = memory.clone();

    let vector_future = vector_store.upsert(&memory.id, &embedding);
    let graph_future = tokio::task::spawn_blocking(move || {
        graph_store_for_blocking.create_node_with_id(
            &memory_for_graph.id,
            "memory",
            MemoryPipeline::memory_to_properties(&memory_for_graph),
            Some(memory_for_graph.user_id.clone()),
        )
    });

    let (vector_result, graph_result) = tokio::join!(vector_future, graph_future);
    let graph_result = graph_result.map_err(|err| CortexError::BackendTransient {
        operation: "create_batch_item".to_string(),
        reason: err.to_string(),
    })?;

    match (vector_result, graph_result) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(graph_err)) => {
            if let Err(compensation_err) = vector_store.delete(&memory.id).await {
                tracing::error!(id = %memory.id, error = %compensation_err, "compensating vector delete failed");
            }
            Err(graph_err)
        }
        (Err(vector_err), _) => Err(vector_err),
    }
}
