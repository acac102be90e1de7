use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use cortex_core::config::HybridConfig;
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::memory::BaseMemory;
use cortex_exec::ExecutionManager;

use crate::fuzzy;
use crate::keyword;
use crate::semantic::SemanticIndex;

const SEMANTIC: &str = "semantic";
const KEYWORD: &str = "keyword";
const FUZZY: &str = "fuzzy";

/// Per-call weight overrides (spec.md §4.2: "The SearchContext may raise/
/// lower per-strategy weights"). A multiplier of 1.2 on `semantic` models
/// the example "technical depth" preference.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    pub weight_multipliers: HashMap<String, f64>,
}

/// One fused candidate plus which strategy produced its winning term, for
/// `RankedResult::contributions`.
#[derive(Debug, Clone)]
pub struct FusedHit {
    pub memory: BaseMemory,
    pub fused_score: f64,
    pub winning_strategy: &'static str,
}

#[derive(Debug, Clone)]
pub struct RankedResult {
    pub hits: Vec<FusedHit>,
    /// Fraction of returned hits each strategy contributed the winning term for.
    pub contributions: HashMap<&'static str, f64>,
    pub timings: HashMap<&'static str, Duration>,
}

struct AdaptiveWeights {
    semantic: f64,
    keyword: f64,
    fuzzy: f64,
}

/// Runs the three retrieval strategies, fuses by `max(score * weight)`, and
/// optionally adapts strategy weights after each call (spec.md §4.2).
pub struct HybridSearchEngine {
    semantic_index: Arc<SemanticIndex>,
    exec: Arc<ExecutionManager>,
    weights: RwLock<AdaptiveWeights>,
    adaptive: bool,
    relevance_threshold: f64,
    max_results: usize,
}

impl HybridSearchEngine {
    pub fn new(
        semantic_index: Arc<SemanticIndex>,
        exec: Arc<ExecutionManager>,
        config: &HybridConfig,
        relevance_threshold: f64,
        max_results: usize,
        adaptive: bool,
    ) -> Self {
        Self {
            semantic_index,
            exec,
            weights: RwLock::new(AdaptiveWeights {
                semantic: config.semantic_weight,
                keyword: config.keyword_weight,
                fuzzy: config.fuzzy_weight,
            }),
            adaptive,
            relevance_threshold,
            max_results,
        }
    }

    fn current_weights(&self, context: Option<&SearchContext>) -> AdaptiveWeights {
        let base = self.weights.read().unwrap();
        let mut weights = AdaptiveWeights {
            semantic: base.semantic,
            keyword: base.keyword,
            fuzzy: base.fuzzy,
        };
        if let Some(ctx) = context {
            if let Some(m) = ctx.weight_multipliers.get(SEMANTIC) {
                weights.semantic *= m;
            }
            if let Some(m) = ctx.weight_multipliers.get(KEYWORD) {
                weights.keyword *= m;
            }
            if let Some(m) = ctx.weight_multipliers.get(FUZZY) {
                weights.fuzzy *= m;
            }
        }
        weights
    }

    async fn run_on_memory_pool(
        &self,
        query: String,
        memories: Vec<BaseMemory>,
        strategy: fn(&str, &BaseMemory) -> f64,
    ) -> CortexResult<(HashMap<String, f64>, Duration)> {
        let exec = self.exec.clone();
        tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let scores = exec.memory_management().submit(move || {
                memories
                    .iter()
                    .map(|m| (m.id.clone(), strategy(&query, m)))
                    .filter(|(_, s)| *s > 0.0)
                    .collect::<HashMap<String, f64>>()
            });
            (scores, started.elapsed())
        })
        .await
        .map_err(|e| CortexError::BackendTransient {
            operation: "hybrid_search".to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn search(&self, query: &str, context: Option<&SearchContext>) -> CortexResult<RankedResult> {
        let weights = self.current_weights(context);
        let memories = self.semantic_index.all_memories();

        // The three strategies run concurrently (spec.md §4.2): semantic
        // stays on the async embedding path, keyword/fuzzy are CPU-bound
        // scans dispatched onto the memory-management pool via
        // `spawn_blocking` so neither blocks the other or the executor.
        let semantic_future = async {
            let started = Instant::now();
            let scores = self
                .semantic_index
                .semantic_strategy_scores(query, cortex_core::constants::DEFAULT_SEMANTIC_THRESHOLD)
                .await?;
            Ok::<_, CortexError>((scores, started.elapsed()))
        };

        let keyword_future = self.run_on_memory_pool(query.to_string(), memories.clone(), keyword::score);
        let fuzzy_future = self.run_on_memory_pool(query.to_string(), memories.clone(), fuzzy::score);

        let (semantic_result, keyword_result, fuzzy_result) =
            tokio::join!(semantic_future, keyword_future, fuzzy_future);
        let (semantic_scores, semantic_elapsed) = semantic_result?;
        let (keyword_scores, keyword_elapsed) = keyword_result?;
        let (fuzzy_scores, fuzzy_elapsed) = fuzzy_result?;

        let memories_by_id: HashMap<&String, &BaseMemory> = memories.iter().map(|m| (&m.id, m)).collect();

        let mut candidate_ids: std::collections::HashSet<&String> = std::collections::HashSet::new();
        candidate_ids.extend(semantic_scores.keys());
        candidate_ids.extend(keyword_scores.keys());
        candidate_ids.extend(fuzzy_scores.keys());

        let mut wins: HashMap<&'static str, usize> = HashMap::new();
        let mut hits: Vec<FusedHit> = Vec::new();

        for id in candidate_ids {
            let Some(memory) = memories_by_id.get(id) else { continue };
            let candidates = [
                (SEMANTIC, semantic_scores.get(id).copied().unwrap_or(0.0) * weights.semantic),
                (KEYWORD, keyword_scores.get(id).copied().unwrap_or(0.0) * weights.keyword),
                (FUZZY, fuzzy_scores.get(id).copied().unwrap_or(0.0) * weights.fuzzy),
            ];
            let (winning_strategy, fused_score) = candidates
                .into_iter()
                .fold((SEMANTIC, f64::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });

            if fused_score < self.relevance_threshold {
                continue;
            }
            *wins.entry(winning_strategy).or_insert(0) += 1;
            hits.push(FusedHit {
                memory: (*memory).clone(),
                fused_score,
                winning_strategy,
            });
        }

        hits.sort_by(|a, b| {
            b.fused_score
                .partial_cmp(&a.fused_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.memory.id.cmp(&b.memory.id))
        });
        hits.truncate(self.max_results);

        let total = hits.len().max(1) as f64;
        let contributions: HashMap<&'static str, f64> = [SEMANTIC, KEYWORD, FUZZY]
            .into_iter()
            .map(|s| (s, wins.get(s).copied().unwrap_or(0) as f64 / total))
            .collect();

        let timings = HashMap::from([
            (SEMANTIC, semantic_elapsed),
            (KEYWORD, keyword_elapsed),
            (FUZZY, fuzzy_elapsed),
        ]);

        if self.adaptive {
            self.apply_adaptive_update(&hits, &timings);
        }

        Ok(RankedResult { hits, contributions, timings })
    }

    /// `w ← clamp(w * (1 + perfScore * 0.1), 0.1, 1.0)` where
    /// `perfScore = avgRelevance / max(avgResponseTimeSeconds, 0.1)`
    /// (spec.md §4.2). Weights do not renormalize.
    fn apply_adaptive_update(&self, hits: &[FusedHit], timings: &HashMap<&'static str, Duration>) {
        if hits.is_empty() {
            return;
        }
        let avg_relevance = hits.iter().map(|h| h.fused_score).sum::<f64>() / hits.len() as f64;
        let avg_response_time_seconds = timings.values().map(|d| d.as_secs_f64()).sum::<f64>() / timings.len().max(1) as f64;
        let perf_score = avg_relevance / avg_response_time_seconds.max(0.1);
        let factor = (1.0 + perf_score * 0.1).clamp(0.0, f64::MAX);

        let mut weights = self.weights.write().unwrap();
        weights.semantic = (weights.semantic * factor).clamp(0.1, 1.0);
        weights.keyword = (weights.keyword * factor).clamp(0.1, 1.0);
        weights.fuzzy = (weights.fuzzy * factor).clamp(0.1, 1.0);
    }
}
