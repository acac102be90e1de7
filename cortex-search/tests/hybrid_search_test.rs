use std::sync::Arc;

use cortex_core::config::{ExecutionConfig, HybridConfig};
use cortex_core::memory::{BaseMemory, Importance, MemoryType};
use cortex_embedder::TfIdfEmbedder;
use cortex_exec::ExecutionManager;
use cortex_search::{HybridSearchEngine, SemanticIndex};

fn memory(id: &str, content: &str) -> BaseMemory {
    BaseMemory::new(
        id.to_string(),
        content.to_string(),
        "u1".to_string(),
        MemoryType::Factual,
        Importance::Medium,
    )
}

async fn build_index(exec: Arc<ExecutionManager>) -> (Arc<SemanticIndex>, Vec<BaseMemory>) {
    let embedder = Arc::new(TfIdfEmbedder::new(&Default::default(), exec));
    let memories = vec![
        memory("m1", "the quick brown fox jumps over the lazy dog"),
        memory("m2", "rust memory safety without garbage collection"),
        memory("m3", "a completely unrelated sentence about weather"),
    ];
    let index = Arc::new(SemanticIndex::new(embedder));
    index.rebuild_index(memories.clone()).await.unwrap();
    (index, memories)
}

#[tokio::test]
async fn hybrid_search_finds_exact_keyword_match_first() {
    let exec = Arc::new(ExecutionManager::new(&ExecutionConfig::default()));
    let (index, _memories) = build_index(exec.clone()).await;
    let engine = HybridSearchEngine::new(index, exec, &HybridConfig::default(), 0.0, 10, false);

    let result = engine.search("rust memory safety", None).await.unwrap();
    assert!(!result.hits.is_empty());
    assert_eq!(result.hits[0].memory.id, "m2");
}

#[tokio::test]
async fn relevance_threshold_drops_unrelated_results() {
    let exec = Arc::new(ExecutionManager::new(&ExecutionConfig::default()));
    let (index, _memories) = build_index(exec.clone()).await;
    let engine = HybridSearchEngine::new(index, exec, &HybridConfig::default(), 0.9, 10, false);

    let result = engine.search("completely different topic nobody wrote", None).await.unwrap();
    assert!(result.hits.iter().all(|h| h.fused_score >= 0.9));
}

#[tokio::test]
async fn contributions_sum_to_one_when_hits_are_returned() {
    let exec = Arc::new(ExecutionManager::new(&ExecutionConfig::default()));
    let (index, _memories) = build_index(exec.clone()).await;
    let engine = HybridSearchEngine::new(index, exec, &HybridConfig::default(), 0.0, 10, false);

    let result = engine.search("fox dog", None).await.unwrap();
    if !result.hits.is_empty() {
        let total: f64 = result.contributions.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn suggestions_prefix_match_the_indexed_vocabulary() {
    let exec = Arc::new(ExecutionManager::new(&ExecutionConfig::default()));
    let (index, _memories) = build_index(exec).await;

    let suggestions = index.suggestions("ru", 5);
    assert!(suggestions.contains(&"rust".to_string()));
}
