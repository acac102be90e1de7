use chrono::Utc;

use cortex_core::constants;
use cortex_core::memory::BaseMemory;

/// Final relevance score composition (spec.md §4.3.1):
/// `final = w_sem*cosine + w_imp*(importance/5) + w_rec*recency + 0.1*context`.
pub fn compose(cosine: f64, memory: &BaseMemory, context_boost: f64) -> f64 {
    let recency = recency_score(memory);
    constants::DEFAULT_SCORE_WEIGHT_SEMANTIC * cosine
        + constants::DEFAULT_SCORE_WEIGHT_IMPORTANCE * memory.importance.score()
        + constants::DEFAULT_SCORE_WEIGHT_RECENCY * recency
        + 0.1 * context_boost
}

/// `recency = max(0.1, 1 / (daysOld + 1))`.
pub fn recency_score(memory: &BaseMemory) -> f64 {
    let days_old = (Utc::now() - memory.updated_at).num_seconds() as f64 / 86_400.0;
    let days_old = days_old.max(0.0);
    (1.0 / (days_old + 1.0)).max(0.1)
}

/// Re-rank boosts: substring match ×1.10, each matching tag ×1.05
/// (multiplicative), high access count ×1.02 (spec.md §4.3.1).
pub fn rerank(base_score: f64, query: &str, memory: &BaseMemory) -> f64 {
    let mut score = base_score;
    let lowered_query = query.to_lowercase();
    if memory.content.to_lowercase().contains(&lowered_query) {
        score *= constants::RERANK_SUBSTRING_MULTIPLIER;
    }
    for tag in &memory.tags {
        if lowered_query.contains(&tag.to_lowercase()) {
            score *= constants::RERANK_TAG_MATCH_MULTIPLIER;
        }
    }
    if memory.access_count > constants::RERANK_HIGH_ACCESS_THRESHOLD {
        score *= constants::RERANK_HIGH_ACCESS_MULTIPLIER;
    }
    score
}
