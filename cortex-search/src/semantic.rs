use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use cortex_cache::TtlCache;
use cortex_core::errors::CortexResult;
use cortex_core::memory::BaseMemory;
use cortex_core::traits::EmbeddingProvider;

use crate::cosine::cosine_similarity;
use crate::scoring;
use crate::synonyms::SynonymTable;

const QUERY_EMBEDDING_CACHE_CAPACITY: u64 = 1_000;
const REBUILD_SUB_BATCH_SIZE: usize = 50;

/// A scored hit from `SemanticIndex::search`.
#[derive(Debug, Clone)]
pub struct SemanticHit {
    pub memory: BaseMemory,
    pub score: f64,
}

/// Tunables for a single `search` call (spec.md §4.3's per-call knobs).
#[derive(Debug, Clone, Copy)]
pub struct SearchRunConfig {
    pub semantic_threshold: f64,
    pub max_results: usize,
    pub context_boost: f64,
    pub apply_rerank: bool,
}

impl Default for SearchRunConfig {
    fn default() -> Self {
        Self {
            semantic_threshold: cortex_core::constants::DEFAULT_SEMANTIC_THRESHOLD,
            max_results: cortex_core::constants::DEFAULT_MAX_RESULTS,
            context_boost: 0.0,
            apply_rerank: true,
        }
    }
}

/// Immutable snapshot swapped in wholesale by `rebuild_index`, so readers
/// never observe a partial mix of old and new state (spec.md §4.3:
/// "replaces state atomically from the caller's perspective").
struct IndexState {
    vectors: HashMap<String, Vec<f32>>,
    memories: HashMap<String, BaseMemory>,
    term_frequency: HashMap<String, u64>,
}

impl IndexState {
    fn empty() -> Self {
        Self {
            vectors: HashMap::new(),
            memories: HashMap::new(),
            term_frequency: HashMap::new(),
        }
    }
}

fn index_tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Maintains `id -> embedding` plus a reverse term-frequency table for
/// suggestions (spec.md §4.3).
pub struct SemanticIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    state: RwLock<Arc<IndexState>>,
    query_cache: TtlCache<String, Vec<f32>>,
    synonyms: SynonymTable,
}

impl SemanticIndex {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            state: RwLock::new(Arc::new(IndexState::empty())),
            query_cache: TtlCache::new(QUERY_EMBEDDING_CACHE_CAPACITY, Duration::from_secs(86_400)),
            synonyms: SynonymTable::with_defaults(),
        }
    }

    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap().vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embeds `memories` in sub-batches of 50 and swaps the whole index
    /// state in one atomic pointer write.
    pub async fn rebuild_index(&self, memories: Vec<BaseMemory>) -> CortexResult<()> {
        let mut next = IndexState::empty();
        for batch in memories.chunks(REBUILD_SUB_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|m| m.content.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts).await?;
            for (memory, vector) in batch.iter().zip(vectors) {
                for token in index_tokens(&memory.content) {
                    *next.term_frequency.entry(token).or_insert(0) += 1;
                }
                next.vectors.insert(memory.id.clone(), vector);
                next.memories.insert(memory.id.clone(), memory.clone());
            }
        }
        *self.state.write().unwrap() = Arc::new(next);
        Ok(())
    }

    async fn embed_query_cached(&self, text: &str) -> CortexResult<Vec<f32>> {
        if let Some(cached) = self.query_cache.get(&text.to_string()) {
            return Ok(cached);
        }
        let vector = self.embedder.embed(text).await?;
        self.query_cache.insert(text.to_string(), vector.clone());
        Ok(vector)
    }

    /// Best cosine similarity per indexed id, scanning every expansion of
    /// `query` and keeping the max (unfiltered, uncomposed). Shared by the
    /// standalone `search` pipeline and the hybrid fuser's semantic
    /// strategy (spec.md §4.2: "score = cosine similarity ... clipped below
    /// by the semantic threshold", distinct from §4.3.1's full composition).
    async fn cosine_scores(&self, query: &str) -> CortexResult<HashMap<String, f64>> {
        let state = self.state.read().unwrap().clone();
        if state.vectors.is_empty() {
            return Ok(HashMap::new());
        }

        let expansions = self.synonyms.expand(query);
        let mut query_vectors = Vec::with_capacity(expansions.len());
        for expansion in &expansions {
            query_vectors.push(self.embed_query_cached(expansion).await?);
        }

        let mut best_cosine: HashMap<String, f64> = HashMap::new();
        for (id, vector) in &state.vectors {
            let mut max_score = 0.0_f64;
            for query_vector in &query_vectors {
                let score = cosine_similarity(query_vector, vector);
                if score > max_score {
                    max_score = score;
                }
            }
            best_cosine.insert(id.clone(), max_score);
        }
        Ok(best_cosine)
    }

    /// Cosine scores clipped by `threshold`, for the hybrid fuser's
    /// semantic strategy (spec.md §4.2).
    pub async fn semantic_strategy_scores(&self, query: &str, threshold: f64) -> CortexResult<HashMap<String, f64>> {
        let scores = self.cosine_scores(query).await?;
        Ok(scores.into_iter().filter(|(_, score)| *score >= threshold).collect())
    }

    /// Full pipeline: expand → embed → linear-scan cosine → threshold →
    /// compose → optional rerank → cut to `max_results` (spec.md §4.3).
    pub async fn search(&self, query: &str, config: SearchRunConfig) -> CortexResult<Vec<SemanticHit>> {
        let state = self.state.read().unwrap().clone();
        let best_cosine = self.cosine_scores(query).await?;

        let mut hits: Vec<SemanticHit> = best_cosine
            .into_iter()
            .filter(|(_, score)| *score >= config.semantic_threshold)
            .filter_map(|(id, cosine)| {
                let memory = state.memories.get(&id)?.clone();
                let mut final_score = scoring::compose(cosine, &memory, config.context_boost);
                if config.apply_rerank {
                    final_score = scoring::rerank(final_score, query, &memory);
                }
                Some(SemanticHit { memory, score: final_score })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.memory.id.cmp(&b.memory.id))
        });
        hits.truncate(config.max_results);
        Ok(hits)
    }

    /// Snapshot of every memory currently indexed, for strategies (keyword,
    /// fuzzy) that score against raw content rather than embeddings.
    pub fn all_memories(&self) -> Vec<BaseMemory> {
        self.state.read().unwrap().memories.values().cloned().collect()
    }

    /// Prefix match on the indexed vocabulary, by corpus term frequency
    /// descending, capped at `limit` (spec.md §4.3 "Suggestions").
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let state = self.state.read().unwrap().clone();
        let prefix = prefix.to_lowercase();
        let mut matches: Vec<(&String, &u64)> = state
            .term_frequency
            .iter()
            .filter(|(term, _)| term.starts_with(&prefix))
            .collect();
        matches.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        matches.into_iter().take(limit).map(|(term, _)| term.clone()).collect()
    }
}
