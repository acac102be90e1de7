use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use cortex_core::config::CortexConfig;
use cortex_core::errors::CortexResult;
use cortex_core::memory::{BaseMemory, MemoryType};
use cortex_core::traits::{EmbeddingProvider, GraphStore, VectorStore};
use cortex_embedder::TfIdfEmbedder;
use cortex_exec::ExecutionManager;
use cortex_graph::InProcessGraphStore;
use cortex_hierarchy::HierarchyManager;
use cortex_pipeline::{CreateRequest, MemoryPipeline};
use cortex_search::{HybridSearchEngine, SearchContext, SemanticIndex};
use cortex_vector::{CollectionRegistry, InMemoryCollection};
use serde_json::Value;

use crate::stats::RuntimeStats;

const MEMORY_COLLECTION: &str = "memories";

/// `search`'s optional scope narrowing (spec.md §6 `search`'s `scope?`
/// input). `All` runs the full hybrid search over every scope; `Session`/
/// `Agent` instead query that one hierarchy scope directly, since neither
/// has its own embedding index to run hybrid search against.
pub enum SearchScope {
    All,
    Session(String),
    Agent(String),
}

/// Wires every component into the public API of spec.md §6: `add`,
/// `add_batch`, `search`, `get`, `update`, `delete`, `stats`, `shutdown`.
///
/// The graph+vector-backed `MemoryPipeline` is the system of record for
/// every memory regardless of scope; `HierarchyManager`'s scopes are a
/// secondary, lighter index used only when a caller asks for scoped
/// retrieval or routing. `SemanticIndex` (and therefore `HybridSearchEngine`)
/// is rebuilt from the full known-memory set after every write, which is
/// the "in-process, memory-resident" tradeoff spec.md accepts at this
/// scale (§6: "no persistent on-disk format is mandated").
pub struct CortexRuntime {
    pipeline: Arc<MemoryPipeline>,
    hierarchy: Arc<HierarchyManager>,
    hybrid: Arc<HybridSearchEngine>,
    semantic_index: Arc<SemanticIndex>,
    execution: Arc<ExecutionManager>,
    known_ids: RwLock<Vec<String>>,
}

impl CortexRuntime {
    pub fn new(config: CortexConfig) -> Self {
        let exec = Arc::new(ExecutionManager::new(&config.execution));

        let embedder = TfIdfEmbedder::new(&config.embedder, exec.clone());
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(embedder);

        let vector_registry = CollectionRegistry::new();
        let collection: Arc<InMemoryCollection> = vector_registry
            .create_collection(MEMORY_COLLECTION, config.embedder.dimension)
            .expect("fresh registry always accepts its first collection");
        let vector_store: Arc<dyn VectorStore> = collection;

        let graph_store: Arc<dyn GraphStore> = Arc::new(InProcessGraphStore::new());

        let pipeline = Arc::new(MemoryPipeline::new(
            embedder.clone(),
            vector_store,
            graph_store,
            config.pipeline.clone(),
            &config.cache,
        ));

        let hierarchy = Arc::new(HierarchyManager::new(config.hierarchy.clone()));

        let semantic_index = Arc::new(SemanticIndex::new(embedder));
        let hybrid = Arc::new(HybridSearchEngine::new(
            semantic_index.clone(),
            exec.clone(),
            &config.hybrid,
            config.search.relevance_threshold,
            config.search.max_results,
            true,
        ));

        Self {
            pipeline,
            hierarchy,
            hybrid,
            semantic_index,
            execution: exec,
            known_ids: RwLock::new(Vec::new()),
        }
    }

    pub fn hierarchy(&self) -> &HierarchyManager {
        &self.hierarchy
    }

    /// `add(content, userId, sessionId?, agentId?, metadata?) -> memoryId`
    /// (spec.md §6). Always writes the canonical vector+graph record; also
    /// routes into hierarchy scopes when a session or agent id is given.
    pub async fn add(
        &self,
        content: impl Into<String>,
        user_id: impl Into<String>,
        session_id: Option<String>,
        agent_id: Option<String>,
        metadata: Option<HashMap<String, Value>>,
    ) -> CortexResult<String> {
        let content = content.into();
        let user_id = user_id.into();

        let mut request = CreateRequest::new(content.clone(), user_id.clone());
        if let Some(session_id) = session_id.clone() {
            request = request.with_session_id(session_id);
        }
        if let Some(metadata) = metadata {
            request = request.with_metadata(metadata);
        }

        let id = self.pipeline.create(request.clone()).await?;
        self.known_ids.write().unwrap().push(id.clone());
        self.reindex().await?;

        if session_id.is_some() || agent_id.is_some() {
            self.hierarchy.add_with_routing(
                &user_id,
                session_id.as_deref().unwrap_or(""),
                agent_id.as_deref().unwrap_or(""),
                content,
                request.memory_type,
                request.importance,
            );
        }

        Ok(id)
    }

    /// `addBatch(items[]) -> ids[] (may contain nulls)` (spec.md §6).
    pub async fn add_batch(&self, requests: Vec<CreateRequest>) -> CortexResult<Vec<Option<String>>> {
        let ids = self.pipeline.create_batch(requests).await?;
        self.known_ids.write().unwrap().extend(ids.iter().flatten().cloned());
        self.reindex().await?;
        Ok(ids)
    }

    /// `get(id) -> Memory or null`.
    pub async fn get(&self, id: &str) -> CortexResult<Option<BaseMemory>> {
        self.pipeline.get(id).await
    }

    /// `search(query, userId, limit, threshold, scope?) -> Memory[]`.
    pub async fn search(
        &self,
        query: &str,
        user_id: &str,
        limit: usize,
        threshold: f64,
        scope: SearchScope,
    ) -> CortexResult<Vec<BaseMemory>> {
        match scope {
            SearchScope::All => {
                let ranked = self.hybrid.search(query, None::<&SearchContext>).await?;
                Ok(ranked
                    .hits
                    .into_iter()
                    .filter(|hit| hit.memory.user_id == user_id && hit.fused_score >= threshold)
                    .take(limit)
                    .map(|hit| hit.memory)
                    .collect())
            }
            SearchScope::Session(session_id) => {
                let hits = self.hierarchy.search_across_hierarchy(user_id, &session_id, "", query, limit).await;
                Ok(hits.into_iter().filter(|h| h.fused_score >= threshold).map(|h| h.memory).collect())
            }
            SearchScope::Agent(agent_id) => {
                let hits = self.hierarchy.search_across_hierarchy(user_id, "", &agent_id, query, limit).await;
                Ok(hits.into_iter().filter(|h| h.fused_score >= threshold).map(|h| h.memory).collect())
            }
        }
    }

    /// `update(id, content?, metadata?) -> bool`.
    pub async fn update(
        &self,
        id: &str,
        content: Option<String>,
        metadata: Option<HashMap<String, Value>>,
    ) -> CortexResult<bool> {
        let updated = self.pipeline.update(id, content, metadata).await?;
        if updated {
            self.reindex().await?;
        }
        Ok(updated)
    }

    /// `delete(id) -> bool`.
    pub async fn delete(&self, id: &str) -> CortexResult<bool> {
        let deleted = self.pipeline.delete(id).await?;
        if deleted {
            self.known_ids.write().unwrap().retain(|known| known != id);
            self.reindex().await?;
        }
        Ok(deleted)
    }

    pub async fn stats(&self) -> RuntimeStats {
        let ids = self.known_ids.read().unwrap().clone();
        let mut memory_type_counts: HashMap<MemoryType, usize> = HashMap::new();
        let mut confidence_sum = 0.0;
        let mut confidence_count = 0usize;
        for id in &ids {
            if let Ok(Some(memory)) = self.pipeline.get(id).await {
                *memory_type_counts.entry(memory.memory_type).or_insert(0) += 1;
                confidence_sum += memory.confidence.value();
                confidence_count += 1;
            }
        }
        let average_confidence = if confidence_count == 0 {
            0.0
        } else {
            confidence_sum / confidence_count as f64
        };

        RuntimeStats {
            pipeline: self.pipeline.stats(),
            execution: self.execution.stats(),
            indexed_memory_count: self.semantic_index.len(),
            memory_type_counts,
            average_confidence,
            user_scope_count: self.hierarchy.user_scope_count(),
            session_scope_count: self.hierarchy.session_scope_count(),
            agent_scope_count: self.hierarchy.agent_scope_count(),
        }
    }

    /// Per-session retrieval analytics (SPEC_FULL §2), surfaced separately
    /// from the aggregate `stats()` snapshot since it's keyed per session
    /// rather than process-wide.
    pub fn session_analytics(&self, session_id: &str) -> Option<cortex_hierarchy::SessionAnalytics> {
        self.hierarchy.session_analytics(session_id)
    }

    pub async fn shutdown(&self) {
        self.pipeline.shutdown().await;
    }

    async fn reindex(&self) -> CortexResult<()> {
        let ids = self.known_ids.read().unwrap().clone();
        let mut memories = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(memory) = self.pipeline.get(&id).await? {
                memories.push(memory);
            }
        }
        self.semantic_index.rebuild_index(memories).await
    }
}
